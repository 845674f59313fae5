use infraguard_rules::Rule;

mod spaces;

pub fn rules() -> Vec<Rule> {
    vec![spaces::rule()]
}

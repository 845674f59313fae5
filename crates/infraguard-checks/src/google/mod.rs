use infraguard_rules::Rule;

mod compute;

pub fn rules() -> Vec<Rule> {
    vec![compute::rule()]
}

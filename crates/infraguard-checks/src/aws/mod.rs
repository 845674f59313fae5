use infraguard_rules::Rule;

mod api_gateway;
mod kinesis;

pub fn rules() -> Vec<Rule> {
    vec![kinesis::rule(), api_gateway::rule()]
}

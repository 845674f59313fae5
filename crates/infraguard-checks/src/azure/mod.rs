use infraguard_rules::Rule;

mod database;
mod keyvault;
mod storage;

pub fn rules() -> Vec<Rule> {
    vec![storage::rule(), keyvault::rule(), database::rule()]
}

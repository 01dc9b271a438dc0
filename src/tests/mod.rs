mod test_utils;
mod test_scenarios;

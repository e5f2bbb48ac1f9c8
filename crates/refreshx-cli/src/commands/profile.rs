use clap::Subcommand;
use refreshx_core::{BmiCategory, Config};
use serde_json::json;

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile with BMI and any problems in stored values
    Show,
}

pub fn run(action: ProfileAction) -> CliResult {
    let config = Config::load()?;

    match action {
        ProfileAction::Show => {
            let profile = &config.profile;
            let bmi = profile.bmi();
            let problems: Vec<String> = profile.validate().iter().map(ToString::to_string).collect();
            print_json(&json!({
                "profile": profile,
                "bmi": bmi,
                "bmi_category": bmi.map(BmiCategory::from_bmi),
                "problems": problems,
            }))?;
        }
    }
    Ok(())
}

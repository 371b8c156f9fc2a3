//! Water intake commands for CLI.

use clap::Subcommand;
use fittrack_core::{Database, GlassSize, WaterIntake, WaterStore};

use super::Context;

#[derive(Subcommand)]
pub enum WaterAction {
    /// Show today's intake
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Log water, in milliliters or as a preset glass
    Add {
        /// Amount in milliliters
        #[arg(required_unless_present = "glass", conflicts_with = "glass")]
        ml: Option<u32>,
        /// Preset size: small (200), medium (300) or large (500)
        #[arg(long)]
        glass: Option<String>,
    },
    /// Set the daily goal in milliliters
    Goal {
        ml: u32,
    },
    /// Reset today's intake to zero
    Reset,
}

fn print_intake(intake: &WaterIntake) {
    println!(
        "{} ml of {} ml ({}%) - {}",
        intake.consumed_ml,
        intake.daily_goal_ml,
        intake.percentage(),
        intake.status().message()
    );
}

pub fn run(action: WaterAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut intake = db
        .load_water(ctx.user_id, ctx.today)?
        .unwrap_or_else(|| WaterIntake::new(ctx.today, ctx.config.water.daily_goal_ml));

    match action {
        WaterAction::Show { json } => {
            if json {
                let value = serde_json::json!({
                    "date": intake.date,
                    "daily_goal_ml": intake.daily_goal_ml,
                    "consumed_ml": intake.consumed_ml,
                    "percentage": intake.percentage(),
                    "status": intake.status(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print_intake(&intake);
            }
        }
        WaterAction::Add { ml, glass } => {
            let (amount, source) = match glass {
                Some(glass) => {
                    let glass = glass.parse::<GlassSize>()?;
                    (glass.milliliters(), glass.label().to_string())
                }
                None => (ml.unwrap_or(0), "Water".to_string()),
            };
            if amount == 0 {
                return Err("amount must be greater than zero".into());
            }
            intake.add(amount);
            db.save_water(ctx.user_id, &intake)?;
            println!("{source}: +{amount} ml");
            print_intake(&intake);
        }
        WaterAction::Goal { ml } => {
            intake.set_goal(ml)?;
            db.save_water(ctx.user_id, &intake)?;
            print_intake(&intake);
        }
        WaterAction::Reset => {
            intake.reset();
            db.save_water(ctx.user_id, &intake)?;
            print_intake(&intake);
        }
    }
    Ok(())
}

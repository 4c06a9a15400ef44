use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        if *check {
            let missing = ConfigLogic::check(&path)?;
            if missing.is_empty() {
                success(format!("{} is complete.", path.display()));
            } else {
                warning(format!(
                    "{} is missing {} key(s); defaults are used:",
                    path.display(),
                    missing.len()
                ));
                for key in missing {
                    println!("   - {}", key);
                }
            }
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor.as_deref())?;
            success("Configuration file edited.");
        }

        if !*print_config && !*check && !*edit_config {
            info(format!("Configuration file: {}", path.display()));
        }
    }

    Ok(())
}

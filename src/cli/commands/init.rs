//! Initialize command.

use console::style;

use farewatch::config::Settings;
use farewatch::repository::run_migrations;

/// Initialize the data directory and database.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    let applied = run_migrations(&settings.database_url()).await?;
    for name in &applied {
        println!("  {} Applied migration {}", style("✓").green(), name);
    }
    if applied.is_empty() {
        println!("  {} Database already up to date", style("→").dim());
    }

    println!(
        "{} Initialized farewatch in {}",
        style("✓").green(),
        settings.data_dir.display()
    );

    Ok(())
}

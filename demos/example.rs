use firebase_config_sync::config::load_options_file;
use firebase_config_sync::{ConfigSync, EnvSnapshot, Field};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), firebase_config_sync::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "development".to_string());

    // Falls back to defaults when there is no options file
    let options = load_options_file("demos/firebase.toml", false)?.with_debug(true);

    let sync = ConfigSync::builder()
        .with_options(options)
        .with_root(".")
        .build()?;

    let env = EnvSnapshot::load("demos", &mode)?;
    let config = sync.build_start(&mode, &env)?;

    println!(
        "Wrote {} for project {:?} (authDomain={:?})",
        sync.output_path().display(),
        config.get(Field::ProjectId),
        config.get(Field::AuthDomain),
    );

    Ok(())
}

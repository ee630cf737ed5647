use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The sea-orm-migration CLI reads DATABASE_URL
    if std::env::var("DATABASE_URL").is_err() {
        match migration::load_config_from_env() {
            Ok(config) => {
                unsafe {
                    std::env::set_var("DATABASE_URL", config.connection_string());
                }
            },
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            },
        }
    }

    cli::run_cli(migration::Migrator).await;
}

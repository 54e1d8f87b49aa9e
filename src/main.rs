use clap::Parser;
use log::error;
use portfolio_app::{Args, ErrorBody};

#[tokio::main]
async fn main() -> Result<(), serde_json::Error> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let pretty = args.pretty;

    match portfolio_app::portfolio(args).await {
        Ok(data) => println!("{}", portfolio_app::to_json(&data, pretty)?),
        Err(err) => {
            error!("Failed to build portfolio: {}", err);
            println!("{}", portfolio_app::to_json(&ErrorBody::from(&err), pretty)?);
            std::process::exit(1);
        }
    }

    Ok(())
}

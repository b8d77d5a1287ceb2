use lambda_http::{service_fn, Error as LambdaError};
use marketing_api::{controller::lambda::entrypoint, model};

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    let _ = env_logger::try_init();
    model::do_migration()?;

    lambda_http::run(service_fn(entrypoint)).await?;
    Ok(())
}

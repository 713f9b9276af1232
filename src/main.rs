#[tokio::main]
async fn main() {
    if let Err(err) = class_booking_api::run().await {
        eprintln!("Server error: {err}");
        std::process::exit(1);
    }
}

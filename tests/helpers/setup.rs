use lawyer_booking_api::Application;
use lawyer_booking_infra::BookingContext;
use lawyer_booking_sdk::{BookingSDK, Role, ID};

pub struct TestApp {
    pub address: String,
}

impl TestApp {
    /// SDK acting as a new user with the given role
    pub fn sdk_as(&self, role: Role) -> (BookingSDK, ID) {
        let user_id = ID::new();
        let sdk = BookingSDK::with_identity(self.address.clone(), user_id.clone(), role);
        (sdk, user_id)
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, BookingSDK) {
    let mut ctx = BookingContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.disable_job_schedulers = true;

    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = BookingSDK::new(address.clone());
    (TestApp { address }, sdk)
}

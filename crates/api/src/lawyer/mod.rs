mod check_availability;
mod create_lawyer;
mod get_lawyer;
mod update_lawyer_availability;

use actix_web::web;
use check_availability::check_availability_controller;
pub use check_availability::CheckAvailabilityUseCase;
use create_lawyer::create_lawyer_controller;
use get_lawyer::get_lawyer_controller;
use update_lawyer_availability::update_lawyer_availability_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/lawyers", web::post().to(create_lawyer_controller));
    cfg.route("/lawyers/{lawyer_id}", web::get().to(get_lawyer_controller));
    cfg.route(
        "/lawyers/{lawyer_id}/availability",
        web::get().to(check_availability_controller),
    );
    cfg.route(
        "/lawyers/{lawyer_id}/availability",
        web::put().to(update_lawyer_availability_controller),
    );
}

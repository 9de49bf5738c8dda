mod create_appointment;
mod get_appointment;
mod get_available_time_slots;
mod get_upcoming_appointments;
mod reject_appointment;
mod subscribers;
mod update_appointment;

use actix_web::web;
use create_appointment::create_appointment_controller;
use get_appointment::get_appointment_controller;
use get_available_time_slots::get_available_time_slots_controller;
use get_upcoming_appointments::get_upcoming_appointments_controller;
use reject_appointment::reject_appointment_controller;
use update_appointment::update_appointment_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/appointments/available-slots",
        web::get().to(get_available_time_slots_controller),
    );
    cfg.route(
        "/appointments/upcoming",
        web::get().to(get_upcoming_appointments_controller),
    );
    cfg.route("/appointments", web::post().to(create_appointment_controller));
    cfg.route(
        "/appointments/{appointment_id}",
        web::get().to(get_appointment_controller),
    );
    cfg.route(
        "/appointments/{appointment_id}",
        web::put().to(update_appointment_controller),
    );
    cfg.route(
        "/appointments/{appointment_id}/reject",
        web::post().to(reject_appointment_controller),
    );
}

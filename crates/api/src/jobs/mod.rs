mod auto_cancel_pending;
mod auto_complete_confirmed;
mod send_reminders;

use actix_web::web;
use auto_cancel_pending::auto_cancel_pending_controller;
pub use auto_cancel_pending::AutoCancelPendingUseCase;
use auto_complete_confirmed::auto_complete_confirmed_controller;
pub use auto_complete_confirmed::AutoCompleteConfirmedUseCase;
use send_reminders::send_reminders_controller;
pub use send_reminders::SendRemindersUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/jobs/auto-cancel",
        web::post().to(auto_cancel_pending_controller),
    );
    cfg.route(
        "/jobs/auto-complete",
        web::post().to(auto_complete_confirmed_controller),
    );
    cfg.route("/jobs/reminders", web::post().to(send_reminders_controller));
}

mod appointment;
mod jobs;
mod lawyer;
mod status;

pub mod dtos {
    pub use crate::appointment::dtos::*;
    pub use crate::lawyer::dtos::*;
}

pub use crate::appointment::api::*;
pub use crate::jobs::api::*;
pub use crate::lawyer::api::*;
pub use crate::status::api::*;

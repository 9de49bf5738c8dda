use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use chrono_tz::Tz;
use lawyer_booking_api_structs::get_available_time_slots::*;
use lawyer_booking_domain::{
    booking_slots::{get_time_slots, is_past_date, unavailable_slots, TimeSlot, TimeSlotsOptions},
    date::{days_in_millis, format_date, parse_date, parse_timezone, utc_midnight},
    TimeSpan, ID,
};
use lawyer_booking_infra::BookingContext;

pub async fn get_available_time_slots_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<BookingContext>,
) -> Result<HttpResponse, ApiError> {
    let query_params = query_params.0;
    let usecase = GetAvailableTimeSlotsUseCase {
        lawyer_id: query_params.lawyer_id,
        date: query_params.date,
        timezone: query_params.timezone,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                date: format_date(&res.date),
                timezone: res.timezone.name().to_string(),
                slots: res.slots,
            })
        })
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct GetAvailableTimeSlotsUseCase {
    pub lawyer_id: ID,
    pub date: String,
    /// Falls back to the configured default timezone
    pub timezone: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidDate(String),
    InvalidTimezone(String),
    NotFound(ID),
    Storage,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDate(msg) => Self::BadClientData(msg),
            UseCaseError::InvalidTimezone(msg) => Self::BadClientData(msg),
            UseCaseError::NotFound(lawyer_id) => Self::NotFound(format!(
                "The lawyer with id: {}, was not found.",
                lawyer_id
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub date: NaiveDate,
    pub timezone: Tz,
    pub slots: Vec<TimeSlot>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAvailableTimeSlotsUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetAvailableTimeSlots";

    async fn execute(&mut self, ctx: &BookingContext) -> Result<Self::Response, Self::Error> {
        let timezone = match &self.timezone {
            Some(tz) => parse_timezone(tz).map_err(|e| UseCaseError::InvalidTimezone(e.to_string()))?,
            None => ctx.config.default_timezone,
        };
        let date = parse_date(&self.date).map_err(|e| UseCaseError::InvalidDate(e.to_string()))?;
        let now = ctx.sys.get_timestamp_millis();

        if is_past_date(&date, now, &timezone) {
            return Ok(UseCaseRes {
                date,
                timezone,
                slots: unavailable_slots(),
            });
        }

        let lawyer = ctx
            .repos
            .lawyers
            .find(&self.lawyer_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.lawyer_id.clone()))?;

        // Wide enough to contain the local date in every timezone
        let day_start = utc_midnight(&date);
        let search_span = TimeSpan::new(day_start - days_in_millis(1), day_start + days_in_millis(2));
        let booked = ctx
            .repos
            .appointments
            .find_overlapping(&lawyer.id, &search_span)
            .await
            .map_err(|_| UseCaseError::Storage)?
            .iter()
            .map(|a| a.timespan())
            .collect::<Vec<_>>();

        let slots = get_time_slots(&TimeSlotsOptions {
            date,
            tz: timezone,
            now,
            availability: &lawyer.availability,
            booked: &booked,
        });

        Ok(UseCaseRes {
            date,
            timezone,
            slots,
        })
    }
}

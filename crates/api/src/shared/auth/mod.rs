mod policy;

use crate::error::ApiError;
use actix_web::HttpRequest;
use lawyer_booking_domain::{Role, ID};
pub use policy::{Permission, Policy};

/// Header carrying the id of the signed in user, set by the auth gateway
pub const USER_ID_HEADER: &str = "x-booking-user-id";
/// Header carrying the role of the signed in user, set by the auth gateway
pub const USER_ROLE_HEADER: &str = "x-booking-user-role";

/// The signed in user making the request
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub user_id: ID,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: ID, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

fn get_header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

fn parse_actor(req: &HttpRequest) -> Result<Actor, ApiError> {
    let user_id = get_header(req, USER_ID_HEADER)
        .ok_or_else(|| ApiError::Unauthorized(format!("Missing the `{}` header", USER_ID_HEADER)))?
        .parse::<ID>()
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;
    let role_header = get_header(req, USER_ROLE_HEADER).ok_or_else(|| {
        ApiError::Unauthorized(format!("Missing the `{}` header", USER_ROLE_HEADER))
    })?;
    let role = role_header.parse::<Role>().map_err(|_| {
        ApiError::Unauthorized(format!(
            "Invalid role: {}. Expected one of client, lawyer or admin",
            role_header
        ))
    })?;

    Ok(Actor::new(user_id, role))
}

/// Identifies the signed in user and the `Policy` it acts under
pub fn protect_route(req: &HttpRequest) -> Result<(Actor, Policy), ApiError> {
    let actor = parse_actor(req)?;
    let policy = Policy::for_role(actor.role);
    Ok((actor, policy))
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn identifies_actor_from_headers() {
        let user_id = ID::new();
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, user_id.as_string()))
            .insert_header((USER_ROLE_HEADER, "lawyer"))
            .to_http_request();
        let (actor, policy) = protect_route(&req).expect("To identify actor");
        assert_eq!(actor, Actor::new(user_id, Role::Lawyer));
        assert!(policy.authorize(&[Permission::RejectAppointment]));
    }

    #[test]
    fn rejects_missing_or_invalid_identity() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(protect_route(&req), Err(ApiError::Unauthorized(_))));

        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "123"))
            .insert_header((USER_ROLE_HEADER, "client"))
            .to_http_request();
        assert!(matches!(protect_route(&req), Err(ApiError::Unauthorized(_))));

        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, ID::new().as_string()))
            .insert_header((USER_ROLE_HEADER, "superuser"))
            .to_http_request();
        assert!(matches!(protect_route(&req), Err(ApiError::Unauthorized(_))));

        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, ID::new().as_string()))
            .to_http_request();
        assert!(matches!(protect_route(&req), Err(ApiError::Unauthorized(_))));
    }
}

use lawyer_booking_domain::Role;
use serde::{Deserialize, Serialize};

/// A Policy decides which actions a user can and cannot take.
///
/// Every `UseCase` that requires a signed in user contains a list of
/// `Permission`s that is required to execute it, if the `Policy` of the
/// user is not authorized some of these `Permission`s the request will be rejected.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Policy {
    /// `Permission`s allowed by the `Policy`
    allow: Option<Vec<Permission>>,
    /// `Permission`s rejected by the `Policy`
    reject: Option<Vec<Permission>>,
}

impl Policy {
    /// The `Policy` granted to every user acting with the given `Role`
    pub fn for_role(role: Role) -> Self {
        let allow = match role {
            Role::Admin => vec![Permission::All],
            Role::Lawyer => vec![
                Permission::UpdateLawyerAvailability,
                Permission::ReadAppointment,
                Permission::UpdateAppointment,
                Permission::RejectAppointment,
            ],
            Role::Client => vec![
                Permission::CreateAppointment,
                Permission::ReadAppointment,
                Permission::UpdateAppointment,
            ],
        };
        Self {
            allow: Some(allow),
            reject: None,
        }
    }

    /// Checks if this `Policy` has the right to list of `Permission`s
    pub fn authorize(&self, permissions: &[Permission]) -> bool {
        if permissions.is_empty() {
            return true;
        }

        if let Some(rejected) = &self.reject {
            for rejected_permission in rejected {
                if *rejected_permission == Permission::All {
                    return false;
                }
                if permissions.contains(rejected_permission) {
                    return false;
                }
            }
        }

        if let Some(allowed) = &self.allow {
            if allowed.contains(&Permission::All) {
                return true;
            }

            return permissions.iter().all(|p| allowed.contains(p));
        }

        false
    }
}

/// `Permission` are different kind of actions that can be performed.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum Permission {
    #[serde(rename = "*")]
    All,
    CreateLawyer,
    UpdateLawyerAvailability,
    CreateAppointment,
    ReadAppointment,
    UpdateAppointment,
    RejectAppointment,
    RunJobs,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn permissions() {
        let policy = Policy::default();
        assert!(policy.authorize(&Vec::new()));
        assert!(!policy.authorize(&vec![Permission::CreateAppointment]));

        let policy = Policy {
            allow: Some(vec![Permission::All]),
            reject: None,
        };
        assert!(policy.authorize(&vec![Permission::CreateAppointment]));

        let policy = Policy {
            allow: Some(vec![Permission::All]),
            reject: Some(vec![Permission::CreateAppointment]),
        };
        assert!(!policy.authorize(&vec![Permission::CreateAppointment]));

        let policy = Policy {
            allow: Some(vec![Permission::CreateAppointment]),
            reject: Some(vec![Permission::All]),
        };
        assert!(!policy.authorize(&vec![Permission::CreateAppointment]));

        let policy = Policy {
            allow: Some(vec![Permission::CreateAppointment, Permission::UpdateAppointment]),
            reject: Some(vec![Permission::RejectAppointment]),
        };
        assert!(policy.authorize(&vec![Permission::CreateAppointment]));
        assert!(policy.authorize(&vec![
            Permission::CreateAppointment,
            Permission::UpdateAppointment
        ]));
        assert!(!policy.authorize(&vec![
            Permission::CreateAppointment,
            Permission::RejectAppointment
        ]));
    }

    #[test]
    fn role_policies() {
        let admin = Policy::for_role(Role::Admin);
        assert!(admin.authorize(&[Permission::RunJobs]));
        assert!(admin.authorize(&[Permission::CreateLawyer]));

        let lawyer = Policy::for_role(Role::Lawyer);
        assert!(lawyer.authorize(&[Permission::RejectAppointment]));
        assert!(lawyer.authorize(&[Permission::UpdateLawyerAvailability]));
        assert!(!lawyer.authorize(&[Permission::CreateAppointment]));
        assert!(!lawyer.authorize(&[Permission::RunJobs]));

        let client = Policy::for_role(Role::Client);
        assert!(client.authorize(&[Permission::CreateAppointment]));
        assert!(client.authorize(&[Permission::UpdateAppointment]));
        assert!(!client.authorize(&[Permission::RejectAppointment]));
        assert!(!client.authorize(&[Permission::CreateLawyer]));
    }
}

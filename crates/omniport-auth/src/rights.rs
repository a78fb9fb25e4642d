//! Omnipotence rights
//!
//! A user holds omnipotence rights when they are a superuser, or when they
//! hold an active `Maintainer` role granting the `omnipotence` right. The
//! admin site and its login form take the check as a [`RightsPredicate`] so
//! it can be swapped without touching either of them.

use std::sync::Arc;

use crate::model::{MAINTAINER_ROLE, OMNIPOTENCE_RIGHT, User};

pub fn has_omnipotence_rights(user: &User) -> bool {
    if user.is_superuser {
        return true;
    }

    user.roles
        .iter()
        .any(|r| r.role == MAINTAINER_ROLE && r.grants(OMNIPOTENCE_RIGHT))
}

/// Privilege check applied to a user
pub trait RightsPredicate: Send + Sync {
    fn has_rights(&self, user: &User) -> bool;
}

impl<F> RightsPredicate for F
where
    F: Fn(&User) -> bool + Send + Sync,
{
    fn has_rights(&self, user: &User) -> bool {
        self(user)
    }
}

/// The default predicate, backed by [`has_omnipotence_rights`]
#[derive(Clone, Copy, Debug, Default)]
pub struct OmnipotenceRights;

impl RightsPredicate for OmnipotenceRights {
    fn has_rights(&self, user: &User) -> bool {
        has_omnipotence_rights(user)
    }
}

pub fn omnipotence_rights() -> Arc<dyn RightsPredicate> {
    Arc::new(OmnipotenceRights)
}

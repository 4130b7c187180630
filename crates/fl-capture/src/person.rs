//! Captures the authenticated user into the report.

use crate::context;
use crate::{HttpRequest, Provider};
use fl_payload::Person;

/// Builds a [`Person`] from the current request's authenticated principal.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonProvider;

impl PersonProvider {
    pub fn capture(&self, req: &dyn HttpRequest) -> Option<Person> {
        req.user_principal()
            .filter(|name| !name.is_empty())
            .map(Person::new)
    }
}

impl Provider<Person> for PersonProvider {
    fn provide(&self) -> Option<Person> {
        context::with_current(|req| req.and_then(|r| self.capture(r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestSnapshot;

    #[test]
    fn test_person_from_principal() {
        let req = RequestSnapshot::new("GET", "http://h/").with_user_principal("alice");
        assert_eq!(PersonProvider.capture(&req), Some(Person::new("alice")));
    }

    #[test]
    fn test_anonymous_request_has_no_person() {
        let req = RequestSnapshot::new("GET", "http://h/");
        assert_eq!(PersonProvider.capture(&req), None);
    }

    #[test]
    fn test_provide_outside_request() {
        assert_eq!(PersonProvider.provide(), None);
    }
}

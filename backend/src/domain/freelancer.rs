//! Freelancer records attached to a user account.

use serde::{Deserialize, Serialize};

use crate::domain::{Entity, EntityValidationError, RecordId, reference};

/// A user offering services, with the skills they advertise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Freelancer {
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(with = "reference")]
    pub user_id: Option<RecordId>,
    pub skills: Vec<String>,
}

impl Entity for Freelancer {
    const NAME: &'static str = "Freelancer";
    const COLLECTION: &'static str = "freelancers";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), EntityValidationError> {
        if self.skills.iter().any(|skill| skill.trim().is_empty()) {
            return Err(EntityValidationError::new(
                "skills",
                "must not contain blank entries",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(vec![])]
    #[case(vec!["rust".to_owned(), "sql".to_owned()])]
    fn accepts_visible_skills(#[case] skills: Vec<String>) {
        let freelancer = Freelancer {
            skills,
            ..Freelancer::default()
        };
        assert!(freelancer.validate().is_ok());
    }

    #[rstest]
    fn rejects_blank_skill() {
        let freelancer = Freelancer {
            skills: vec!["rust".to_owned(), " ".to_owned()],
            ..Freelancer::default()
        };
        let err = freelancer.validate().expect_err("blank skill");
        assert_eq!(err.to_string(), "skills must not contain blank entries");
    }

    #[rstest]
    fn decodes_user_reference() {
        let freelancer: Freelancer = serde_json::from_value(json!({
            "userId": "65f1c0ffee0000000000beef",
            "skills": ["design"],
        }))
        .expect("decode");
        assert_eq!(
            freelancer.user_id.map(|id| id.to_string()).as_deref(),
            Some("65f1c0ffee0000000000beef")
        );
    }
}

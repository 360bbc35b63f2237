//! In-memory persistence for applicants, schemes, and applications.
//!
//! The store keeps all three record families behind one `RwLock` so that a
//! cross-entity mutation, such as deleting an applicant and flagging their
//! applications for review, happens atomically. Listing order is id order.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::error::{EngineError, EngineResult};
use crate::models::{Applicant, Application, ApplicationStatus, Scheme};

#[derive(Debug, Default)]
struct Database {
    applicants: BTreeMap<String, Applicant>,
    schemes: BTreeMap<String, Scheme>,
    applications: BTreeMap<String, Application>,
}

/// In-memory record store shared by all request handlers.
#[derive(Debug, Default)]
pub struct Store {
    db: RwLock<Database>,
}

fn page_of<T: Clone>(records: &BTreeMap<String, T>, offset: usize, limit: usize) -> Vec<T> {
    records.values().skip(offset).take(limit).cloned().collect()
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns one page of applicants along with the total applicant count.
    pub async fn list_applicants(&self, offset: usize, limit: usize) -> (Vec<Applicant>, usize) {
        let db = self.db.read().await;
        (page_of(&db.applicants, offset, limit), db.applicants.len())
    }

    /// Looks up an applicant by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ApplicantNotFound`] if no such applicant exists.
    pub async fn get_applicant(&self, id: &str) -> EngineResult<Applicant> {
        let db = self.db.read().await;
        db.applicants
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::ApplicantNotFound { id: id.to_string() })
    }

    /// Inserts a batch of applicants.
    pub async fn insert_applicants(&self, applicants: Vec<Applicant>) {
        let mut db = self.db.write().await;
        for applicant in applicants {
            db.applicants.insert(applicant.id.clone(), applicant);
        }
    }

    /// Replaces an existing applicant record.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ApplicantNotFound`] if no such applicant exists.
    pub async fn replace_applicant(&self, applicant: Applicant) -> EngineResult<Applicant> {
        let mut db = self.db.write().await;
        if !db.applicants.contains_key(&applicant.id) {
            return Err(EngineError::ApplicantNotFound {
                id: applicant.id.clone(),
            });
        }
        db.applicants.insert(applicant.id.clone(), applicant.clone());
        Ok(applicant)
    }

    /// Deletes an applicant and flags their applications for review.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ApplicantNotFound`] if no such applicant exists.
    pub async fn delete_applicant(&self, id: &str) -> EngineResult<()> {
        let mut db = self.db.write().await;
        if db.applicants.remove(id).is_none() {
            return Err(EngineError::ApplicantNotFound { id: id.to_string() });
        }
        for application in db.applications.values_mut() {
            if application.applicant_id == id {
                application.status = ApplicationStatus::NeedsReview;
            }
        }
        Ok(())
    }

    /// Returns one page of schemes along with the total scheme count.
    pub async fn list_schemes(&self, offset: usize, limit: usize) -> (Vec<Scheme>, usize) {
        let db = self.db.read().await;
        (page_of(&db.schemes, offset, limit), db.schemes.len())
    }

    /// Returns every scheme, for eligibility filtering.
    pub async fn all_schemes(&self) -> Vec<Scheme> {
        let db = self.db.read().await;
        db.schemes.values().cloned().collect()
    }

    /// Looks up a scheme by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SchemeNotFound`] if no such scheme exists.
    pub async fn get_scheme(&self, id: &str) -> EngineResult<Scheme> {
        let db = self.db.read().await;
        db.schemes
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::SchemeNotFound { id: id.to_string() })
    }

    /// Inserts a batch of schemes, enforcing name uniqueness.
    ///
    /// The whole batch is rejected when any incoming name collides with a
    /// stored scheme, so a partial batch is never persisted.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateSchemeName`] naming the first conflict.
    pub async fn insert_schemes(&self, schemes: Vec<Scheme>) -> EngineResult<()> {
        let mut db = self.db.write().await;
        let mut incoming = std::collections::HashSet::new();
        for scheme in &schemes {
            let collides_with_stored = db
                .schemes
                .values()
                .any(|existing| existing.name == scheme.name);
            if collides_with_stored || !incoming.insert(scheme.name.as_str()) {
                return Err(EngineError::DuplicateSchemeName {
                    name: scheme.name.clone(),
                });
            }
        }
        for scheme in schemes {
            db.schemes.insert(scheme.id.clone(), scheme);
        }
        Ok(())
    }

    /// Replaces an existing scheme record.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SchemeNotFound`] if no such scheme exists.
    pub async fn replace_scheme(&self, scheme: Scheme) -> EngineResult<Scheme> {
        let mut db = self.db.write().await;
        if !db.schemes.contains_key(&scheme.id) {
            return Err(EngineError::SchemeNotFound {
                id: scheme.id.clone(),
            });
        }
        db.schemes.insert(scheme.id.clone(), scheme.clone());
        Ok(scheme)
    }

    /// Deletes a scheme and flags its applications for review.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SchemeNotFound`] if no such scheme exists.
    pub async fn delete_scheme(&self, id: &str) -> EngineResult<()> {
        let mut db = self.db.write().await;
        if db.schemes.remove(id).is_none() {
            return Err(EngineError::SchemeNotFound { id: id.to_string() });
        }
        for application in db.applications.values_mut() {
            if application.scheme_id == id {
                application.status = ApplicationStatus::NeedsReview;
            }
        }
        Ok(())
    }

    /// Returns one page of applications along with the total count.
    pub async fn list_applications(&self, offset: usize, limit: usize) -> (Vec<Application>, usize) {
        let db = self.db.read().await;
        (page_of(&db.applications, offset, limit), db.applications.len())
    }

    /// Returns true if the applicant has already applied for the scheme.
    pub async fn application_exists(&self, applicant_id: &str, scheme_id: &str) -> bool {
        let db = self.db.read().await;
        db.applications
            .values()
            .any(|a| a.applicant_id == applicant_id && a.scheme_id == scheme_id)
    }

    /// Inserts a new application, enforcing one application per
    /// (applicant, scheme) pair.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateApplication`] on a repeat application.
    pub async fn insert_application(&self, application: Application) -> EngineResult<()> {
        let mut db = self.db.write().await;
        if db.applications.values().any(|a| {
            a.applicant_id == application.applicant_id && a.scheme_id == application.scheme_id
        }) {
            return Err(EngineError::DuplicateApplication {
                applicant_id: application.applicant_id.clone(),
                scheme_id: application.scheme_id.clone(),
            });
        }
        db.applications.insert(application.id.clone(), application);
        Ok(())
    }

    /// Updates the status of an application and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ApplicationNotFound`] if no such application
    /// exists.
    pub async fn update_application_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> EngineResult<Application> {
        let mut db = self.db.write().await;
        let application = db
            .applications
            .get_mut(id)
            .ok_or_else(|| EngineError::ApplicationNotFound { id: id.to_string() })?;
        application.status = status;
        application.updated_at = chrono::Utc::now();
        Ok(application.clone())
    }

    /// Deletes an application.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ApplicationNotFound`] if no such application
    /// exists.
    pub async fn delete_application(&self, id: &str) -> EngineResult<()> {
        let mut db = self.db.write().await;
        db.applications
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| EngineError::ApplicationNotFound { id: id.to_string() })
    }
}

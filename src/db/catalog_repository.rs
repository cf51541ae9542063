use crate::db::models::{Document, Project, SourceCode, Template, UploadedFile, WorkEstimate};
use crate::errors::Error;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

/// Read-only lookups over the entities generation tasks operate on:
/// projects, documents, source files, uploads, templates and sessions.
/// The engine validates parent references and gathers generation input
/// through this repository; it never writes to these tables.
pub struct CatalogRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> CatalogRepository<'a> {
    /// Creates a new CatalogRepository instance
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        CatalogRepository { conn }
    }

    /// Resolves a bearer token to the user id it belongs to
    ///
    /// # Errors
    /// Returns an Error if database operations fail
    pub fn user_for_session(&mut self, session_token: &str) -> Result<Option<String>, Error> {
        use crate::schema::sessions::dsl::*;
        let found = sessions
            .filter(token.eq(session_token))
            .select(user_id)
            .first::<String>(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Retrieves a project by id
    pub fn get_project(&mut self, project_id: &str) -> Result<Option<Project>, Error> {
        use crate::schema::projects::dsl::*;
        let found = projects
            .filter(id.eq(project_id))
            .first::<Project>(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Retrieves a document by id
    pub fn get_document(&mut self, document_id: &str) -> Result<Option<Document>, Error> {
        use crate::schema::documents::dsl::*;
        let found = documents
            .filter(id.eq(document_id))
            .first::<Document>(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Retrieves all documents matching the given ids
    pub fn get_documents(&mut self, document_ids: &[String]) -> Result<Vec<Document>, Error> {
        use crate::schema::documents::dsl::*;
        let found = documents
            .filter(id.eq_any(document_ids))
            .load::<Document>(self.conn)?;
        Ok(found)
    }

    /// Retrieves all documents belonging to a project
    pub fn documents_for_project(&mut self, project: &str) -> Result<Vec<Document>, Error> {
        use crate::schema::documents::dsl::*;
        let found = documents
            .filter(project_id.eq(project))
            .load::<Document>(self.conn)?;
        Ok(found)
    }

    /// Retrieves documents of a project created inside a date range.
    /// Timestamps are stored as RFC 3339 UTC text, so lexicographic
    /// comparison matches chronological order.
    pub fn documents_in_range(
        &mut self,
        project: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Document>, Error> {
        use crate::schema::documents::dsl::*;
        let found = documents
            .filter(project_id.eq(project))
            .filter(created_at.ge(start_date))
            .filter(created_at.le(end_date))
            .load::<Document>(self.conn)?;
        Ok(found)
    }

    /// Retrieves all source files matching the given ids
    pub fn get_source_codes(&mut self, code_ids: &[String]) -> Result<Vec<SourceCode>, Error> {
        use crate::schema::source_codes::dsl::*;
        let found = source_codes
            .filter(id.eq_any(code_ids))
            .load::<SourceCode>(self.conn)?;
        Ok(found)
    }

    /// Retrieves all source files belonging to a project
    pub fn source_codes_for_project(&mut self, project: &str) -> Result<Vec<SourceCode>, Error> {
        use crate::schema::source_codes::dsl::*;
        let found = source_codes
            .filter(project_id.eq(project))
            .load::<SourceCode>(self.conn)?;
        Ok(found)
    }

    /// Retrieves source files of a project created inside a date range
    pub fn source_codes_in_range(
        &mut self,
        project: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<SourceCode>, Error> {
        use crate::schema::source_codes::dsl::*;
        let found = source_codes
            .filter(project_id.eq(project))
            .filter(created_at.ge(start_date))
            .filter(created_at.le(end_date))
            .load::<SourceCode>(self.conn)?;
        Ok(found)
    }

    /// Retrieves the most recently uploaded file of a project
    pub fn latest_file_for_project(
        &mut self,
        project: &str,
    ) -> Result<Option<UploadedFile>, Error> {
        use crate::schema::uploaded_files::dsl::*;
        let found = uploaded_files
            .filter(project_id.eq(project))
            .order_by(created_at.desc())
            .first::<UploadedFile>(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Retrieves a proposal template by id
    pub fn get_template(&mut self, template_id: &str) -> Result<Option<Template>, Error> {
        use crate::schema::templates::dsl::*;
        let found = templates
            .filter(id.eq(template_id))
            .first::<Template>(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Retrieves all past work estimates, used to average historical effort
    pub fn past_estimates(&mut self) -> Result<Vec<WorkEstimate>, Error> {
        use crate::schema::work_estimates::dsl::*;
        let found = work_estimates.load::<WorkEstimate>(self.conn)?;
        Ok(found)
    }
}

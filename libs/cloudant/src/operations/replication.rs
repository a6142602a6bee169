use std::collections::HashMap;

use cloudant_core::{DetailedResponse, SdkError};
use http::Method;

use super::{Body, comma_separated, with_body};
use crate::CloudantV1;
use crate::common::request;
use crate::models::{
    DocumentResult, ReplicationDocument, SchedulerDocsResult, SchedulerDocument, SchedulerJob,
    SchedulerJobsResult,
};

#[derive(Debug, Clone, Default)]
pub struct HeadReplicationDocumentOptions {
    pub doc_id: String,
    pub if_none_match: Option<String>,
    pub headers: HashMap<String, String>,
}

impl HeadReplicationDocumentOptions {
    #[must_use]
    pub fn new(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteReplicationDocumentOptions {
    pub doc_id: String,
    pub if_match: Option<String>,
    pub batch: Option<String>,
    pub rev: Option<String>,
    pub headers: HashMap<String, String>,
}

impl DeleteReplicationDocumentOptions {
    #[must_use]
    pub fn new(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetReplicationDocumentOptions {
    pub doc_id: String,
    pub if_none_match: Option<String>,
    pub attachments: Option<bool>,
    pub att_encoding_info: Option<bool>,
    pub conflicts: Option<bool>,
    pub deleted_conflicts: Option<bool>,
    pub latest: Option<bool>,
    pub local_seq: Option<bool>,
    pub meta: Option<bool>,
    pub rev: Option<String>,
    pub revs: Option<bool>,
    pub revs_info: Option<bool>,
    pub headers: HashMap<String, String>,
}

impl GetReplicationDocumentOptions {
    #[must_use]
    pub fn new(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PutReplicationDocumentOptions {
    pub doc_id: String,
    pub replication_document: Body<ReplicationDocument>,
    pub if_match: Option<String>,
    pub batch: Option<String>,
    pub new_edits: Option<bool>,
    pub rev: Option<String>,
    pub headers: HashMap<String, String>,
}

impl PutReplicationDocumentOptions {
    #[must_use]
    pub fn new(
        doc_id: impl Into<String>,
        replication_document: impl Into<Body<ReplicationDocument>>,
    ) -> Self {
        Self {
            doc_id: doc_id.into(),
            replication_document: replication_document.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeadSchedulerDocumentOptions {
    pub doc_id: String,
    pub headers: HashMap<String, String>,
}

impl HeadSchedulerDocumentOptions {
    #[must_use]
    pub fn new(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetSchedulerDocumentOptions {
    pub doc_id: String,
    pub headers: HashMap<String, String>,
}

impl GetSchedulerDocumentOptions {
    #[must_use]
    pub fn new(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetSchedulerDocsOptions {
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    /// Filter by replication state (`initializing`, `running`, `failed`, ...)
    pub states: Vec<String>,
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct HeadSchedulerJobOptions {
    pub job_id: String,
    pub headers: HashMap<String, String>,
}

impl HeadSchedulerJobOptions {
    #[must_use]
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetSchedulerJobOptions {
    pub job_id: String,
    pub headers: HashMap<String, String>,
}

impl GetSchedulerJobOptions {
    #[must_use]
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetSchedulerJobsOptions {
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    pub headers: HashMap<String, String>,
}

impl CloudantV1 {
    pub async fn head_replication_document(
        &self,
        options: &HeadReplicationDocumentOptions,
    ) -> Result<DetailedResponse<()>, SdkError> {
        let request = request(Method::HEAD, "/_replicator/{doc_id}", "headReplicationDocument")
            .path_param("doc_id", options.doc_id.as_str())
            .header_opt("If-None-Match", options.if_none_match.as_deref())
            .custom_headers(&options.headers);
        self.service.send_head(request).await
    }

    /// Cancel a persistent replication by deleting its document
    pub async fn delete_replication_document(
        &self,
        options: &DeleteReplicationDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>, SdkError> {
        let request = request(Method::DELETE, "/_replicator/{doc_id}", "deleteReplicationDocument")
            .path_param("doc_id", options.doc_id.as_str())
            .accept_json()
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("batch", options.batch.as_deref())
            .query_opt("rev", options.rev.as_deref())
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn get_replication_document(
        &self,
        options: &GetReplicationDocumentOptions,
    ) -> Result<DetailedResponse<ReplicationDocument>, SdkError> {
        let request = request(Method::GET, "/_replicator/{doc_id}", "getReplicationDocument")
            .path_param("doc_id", options.doc_id.as_str())
            .accept_json()
            .header_opt("If-None-Match", options.if_none_match.as_deref())
            .query_opt("attachments", options.attachments)
            .query_opt("att_encoding_info", options.att_encoding_info)
            .query_opt("conflicts", options.conflicts)
            .query_opt("deleted_conflicts", options.deleted_conflicts)
            .query_opt("latest", options.latest)
            .query_opt("local_seq", options.local_seq)
            .query_opt("meta", options.meta)
            .query_opt("rev", options.rev.as_deref())
            .query_opt("revs", options.revs)
            .query_opt("revs_info", options.revs_info)
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Start or update a persistent replication
    pub async fn put_replication_document(
        &self,
        options: &PutReplicationDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>, SdkError> {
        let request = request(Method::PUT, "/_replicator/{doc_id}", "putReplicationDocument")
            .path_param("doc_id", options.doc_id.as_str())
            .accept_json()
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("batch", options.batch.as_deref())
            .query_opt("new_edits", options.new_edits)
            .query_opt("rev", options.rev.as_deref());
        let request =
            with_body(request, &options.replication_document).custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn head_scheduler_document(
        &self,
        options: &HeadSchedulerDocumentOptions,
    ) -> Result<DetailedResponse<()>, SdkError> {
        let request = request(
            Method::HEAD,
            "/_scheduler/docs/_replicator/{doc_id}",
            "headSchedulerDocument",
        )
        .path_param("doc_id", options.doc_id.as_str())
        .custom_headers(&options.headers);
        self.service.send_head(request).await
    }

    /// Scheduler state of one replication document
    pub async fn get_scheduler_document(
        &self,
        options: &GetSchedulerDocumentOptions,
    ) -> Result<DetailedResponse<SchedulerDocument>, SdkError> {
        let request = request(
            Method::GET,
            "/_scheduler/docs/_replicator/{doc_id}",
            "getSchedulerDocument",
        )
        .path_param("doc_id", options.doc_id.as_str())
        .accept_json()
        .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn get_scheduler_docs(
        &self,
        options: &GetSchedulerDocsOptions,
    ) -> Result<DetailedResponse<SchedulerDocsResult>, SdkError> {
        let states = (!options.states.is_empty()).then(|| comma_separated(&options.states));
        let request = request(Method::GET, "/_scheduler/docs", "getSchedulerDocs")
            .accept_json()
            .query_opt("limit", options.limit)
            .query_opt("skip", options.skip)
            .query_opt("states", states)
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn head_scheduler_job(
        &self,
        options: &HeadSchedulerJobOptions,
    ) -> Result<DetailedResponse<()>, SdkError> {
        let request = request(Method::HEAD, "/_scheduler/jobs/{job_id}", "headSchedulerJob")
            .path_param("job_id", options.job_id.as_str())
            .custom_headers(&options.headers);
        self.service.send_head(request).await
    }

    pub async fn get_scheduler_job(
        &self,
        options: &GetSchedulerJobOptions,
    ) -> Result<DetailedResponse<SchedulerJob>, SdkError> {
        let request = request(Method::GET, "/_scheduler/jobs/{job_id}", "getSchedulerJob")
            .path_param("job_id", options.job_id.as_str())
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Replication jobs currently known to the scheduler
    pub async fn get_scheduler_jobs(
        &self,
        options: &GetSchedulerJobsOptions,
    ) -> Result<DetailedResponse<SchedulerJobsResult>, SdkError> {
        let request = request(Method::GET, "/_scheduler/jobs", "getSchedulerJobs")
            .accept_json()
            .query_opt("limit", options.limit)
            .query_opt("skip", options.skip)
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}

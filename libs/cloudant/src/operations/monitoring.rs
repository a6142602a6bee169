use std::collections::HashMap;

use cloudant_core::{DetailedResponse, SdkError};
use http::Method;

use crate::CloudantV1;
use crate::common::request;
use crate::models::{
    ActiveTask, ActivityTrackerEvents, CurrentThroughputInformation, MembershipInformation,
    OkResult, UpInformation,
};

#[derive(Debug, Clone, Default)]
pub struct HeadUpInformationOptions {
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetUpInformationOptions {
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetActiveTasksOptions {
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetActivityTrackerEventsOptions {
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct PostActivityTrackerEventsOptions {
    /// `management` is required; `data` is optional
    pub types: Vec<String>,
    pub headers: HashMap<String, String>,
}

impl PostActivityTrackerEventsOptions {
    #[must_use]
    pub fn new(types: Vec<String>) -> Self {
        Self {
            types,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetCurrentThroughputInformationOptions {
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetMembershipInformationOptions {
    pub headers: HashMap<String, String>,
}

impl CloudantV1 {
    /// Health check without a body
    pub async fn head_up_information(
        &self,
        options: &HeadUpInformationOptions,
    ) -> Result<DetailedResponse<()>, SdkError> {
        let request = request(Method::HEAD, "/_up", "headUpInformation")
            .custom_headers(&options.headers);
        self.service.send_head(request).await
    }

    pub async fn get_up_information(
        &self,
        options: &GetUpInformationOptions,
    ) -> Result<DetailedResponse<UpInformation>, SdkError> {
        let request = request(Method::GET, "/_up", "getUpInformation")
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn get_active_tasks(
        &self,
        options: &GetActiveTasksOptions,
    ) -> Result<DetailedResponse<Vec<ActiveTask>>, SdkError> {
        let request = request(Method::GET, "/_active_tasks", "getActiveTasks")
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn get_activity_tracker_events(
        &self,
        options: &GetActivityTrackerEventsOptions,
    ) -> Result<DetailedResponse<ActivityTrackerEvents>, SdkError> {
        let request = request(
            Method::GET,
            "/_api/v2/user/activity_tracker/events",
            "getActivityTrackerEvents",
        )
        .accept_json()
        .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn post_activity_tracker_events(
        &self,
        options: &PostActivityTrackerEventsOptions,
    ) -> Result<DetailedResponse<OkResult>, SdkError> {
        if options.types.is_empty() {
            return Err(SdkError::Validation("types must not be empty".to_owned()));
        }
        let request = request(
            Method::POST,
            "/_api/v2/user/activity_tracker/events",
            "postActivityTrackerEvents",
        )
        .accept_json()
        .json_body(&ActivityTrackerEvents {
            types: options.types.clone(),
        })
        .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Throughput consumed in the current second
    pub async fn get_current_throughput_information(
        &self,
        options: &GetCurrentThroughputInformationOptions,
    ) -> Result<DetailedResponse<CurrentThroughputInformation>, SdkError> {
        let request = request(
            Method::GET,
            "/_api/v2/user/current/throughput",
            "getCurrentThroughputInformation",
        )
        .accept_json()
        .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn get_membership_information(
        &self,
        options: &GetMembershipInformationOptions,
    ) -> Result<DetailedResponse<MembershipInformation>, SdkError> {
        let request = request(Method::GET, "/_membership", "getMembershipInformation")
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}

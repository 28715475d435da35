//! HTTP client for the room/schedule API.
//!
//! One method per remote resource. Read operations get a single
//! extended-timeout retry when the first attempt times out; mutations
//! (login, password change) are never retried. A 401 from any endpoint
//! clears the injected session store before the error is surfaced.

use super::error::ApiError;
use super::session::SessionStore;
use super::types::{
    Announcement, AuthSession, Credentials, Department, Envelope, RoomInfo, StudentInfo,
    StudentScheduleRow, StudyType, UserProfile, WeeklySchedule,
};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the remote API, e.g. `https://api.college.example/`.
    pub base_url: String,
    /// Deadline for the first attempt of every request.
    pub read_timeout: Duration,
    /// Deadline for the single retry after a timeout. Roughly double
    /// the read timeout.
    pub retry_timeout: Duration,
    /// User agent string sent with every request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            read_timeout: Duration::from_secs(12),
            retry_timeout: Duration::from_secs(24),
            user_agent: format!("roomsched/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Client for the room/schedule API.
pub struct ApiClient {
    http: Client,
    base: Url,
    config: ApiConfig,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Creates a client from the given configuration and session store.
    pub fn new(config: ApiConfig, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let base = Url::parse(&config.base_url)?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                message: format!("{} cannot serve as a base url", config.base_url),
            });
        }

        // No global timeout on the client; each request carries its own
        // deadline so the retry can extend it.
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ApiError::NetworkUnavailable {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base,
            config,
            session,
        })
    }

    // ---- auth ----

    /// POST auth/login. On success the token and profile are written to
    /// the session store. Never retried.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ApiError> {
        info!(username = %credentials.username, "logging in");
        let session: AuthSession = self
            .post_json(&["auth", "login"], credentials)
            .await?;
        self.session
            .set(session.token.clone(), session.user.clone());
        Ok(session)
    }

    /// GET auth/profile for the authenticated user.
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.get_json(&["auth", "profile"], &[]).await
    }

    /// POST auth/change-password. Never retried.
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            old_password: &'a str,
            new_password: &'a str,
        }
        self.post_unit(
            &["auth", "change-password"],
            &Body {
                old_password,
                new_password,
            },
        )
        .await
    }

    // ---- rooms ----

    /// GET rooms/{code}.
    pub async fn room_info(&self, code: &str) -> Result<RoomInfo, ApiError> {
        self.get_json(&["rooms", code], &[]).await
    }

    /// GET rooms/id/{id}.
    pub async fn room_info_by_id(&self, id: &str) -> Result<RoomInfo, ApiError> {
        self.get_json(&["rooms", "id", id], &[]).await
    }

    /// GET rooms/{code}/schedule for the given study type.
    ///
    /// A missing payload decodes as an empty weekly schedule; the
    /// secondary-study-type fallback lives at the caller boundary.
    pub async fn room_schedule(
        &self,
        code: &str,
        study_type: StudyType,
    ) -> Result<WeeklySchedule, ApiError> {
        let schedule: Option<WeeklySchedule> = self
            .get_json_opt(
                &["rooms", code, "schedule"],
                &[("studyType", study_type.as_str().to_string())],
            )
            .await?;
        Ok(schedule.unwrap_or_default())
    }

    /// GET rooms/search by free-text query, optionally scoped to a department.
    pub async fn search_rooms(
        &self,
        query: &str,
        department_id: Option<&str>,
    ) -> Result<Vec<RoomInfo>, ApiError> {
        let mut params = vec![("q", query.to_string())];
        if let Some(dept) = department_id {
            params.push(("departmentId", dept.to_string()));
        }
        self.get_json(&["rooms", "search"], &params).await
    }

    /// GET rooms/{code}/announcements.
    pub async fn room_announcements(&self, code: &str) -> Result<Vec<Announcement>, ApiError> {
        self.get_json(&["rooms", code, "announcements"], &[]).await
    }

    // ---- departments & schedules ----

    /// GET departments.
    pub async fn departments(&self) -> Result<Vec<Department>, ApiError> {
        self.get_json(&["departments"], &[]).await
    }

    /// GET schedules for a department, stage and study type.
    pub async fn weekly_schedule(
        &self,
        department_id: &str,
        stage: &str,
        study_type: StudyType,
    ) -> Result<WeeklySchedule, ApiError> {
        let schedule: Option<WeeklySchedule> = self
            .get_json_opt(
                &["schedules"],
                &[
                    ("departmentId", department_id.to_string()),
                    ("stage", stage.to_string()),
                    ("studyType", study_type.as_str().to_string()),
                ],
            )
            .await?;
        Ok(schedule.unwrap_or_default())
    }

    /// GET dean/schedules/{id}.
    pub async fn dean_schedule(&self, schedule_id: &str) -> Result<WeeklySchedule, ApiError> {
        let schedule: Option<WeeklySchedule> = self
            .get_json_opt(&["dean", "schedules", schedule_id], &[])
            .await?;
        Ok(schedule.unwrap_or_default())
    }

    // ---- students ----

    /// GET students/{id}.
    pub async fn student(&self, student_id: &str) -> Result<StudentInfo, ApiError> {
        self.get_json(&["students", student_id], &[]).await
    }

    /// GET students/{id}/schedule: the raw per-entry rows, unordered.
    pub async fn student_schedule(
        &self,
        student_id: &str,
    ) -> Result<Vec<StudentScheduleRow>, ApiError> {
        self.get_json(&["students", student_id, "schedule"], &[])
            .await
    }

    // ---- request plumbing ----

    /// Builds the absolute URL for the given path segments. Segments are
    /// percent-encoded by the url crate, so raw room codes and free-text
    /// ids are safe here.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET with the retry-on-timeout policy; requires a payload.
    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let status_and_data = self.get_with_retry(segments, query).await?;
        require_data(status_and_data)
    }

    /// GET with the retry-on-timeout policy; tolerates a missing payload.
    async fn get_json_opt<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Option<T>, ApiError> {
        let (_, data) = self.get_with_retry(segments, query).await?;
        Ok(data)
    }

    async fn get_with_retry<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<(u16, Option<T>), ApiError> {
        let url = self.endpoint(segments);
        match self
            .attempt::<T, ()>(Method::GET, &url, query, None, self.config.read_timeout)
            .await
        {
            Err(err) if err.is_timeout() => {
                warn!(
                    url = %url,
                    retry_timeout_ms = self.config.retry_timeout.as_millis() as u64,
                    "request timed out, retrying once with extended timeout"
                );
                self.attempt::<T, ()>(Method::GET, &url, query, None, self.config.retry_timeout)
                    .await
            }
            other => other,
        }
    }

    /// POST without retry; requires a payload.
    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments);
        let status_and_data = self
            .attempt::<T, B>(Method::POST, &url, &[], Some(body), self.config.read_timeout)
            .await?;
        require_data(status_and_data)
    }

    /// POST without retry; any successful envelope counts, payload ignored.
    async fn post_unit<B: Serialize>(&self, segments: &[&str], body: &B) -> Result<(), ApiError> {
        let url = self.endpoint(segments);
        self.attempt::<serde_json::Value, B>(
            Method::POST,
            &url,
            &[],
            Some(body),
            self.config.read_timeout,
        )
        .await?;
        Ok(())
    }

    /// Issues a single request and decodes the envelope.
    async fn attempt<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: &Url,
        query: &[(&str, String)],
        body: Option<&B>,
        timeout: Duration,
    ) -> Result<(u16, Option<T>), ApiError> {
        debug!(method = %method, url = %url, timeout_ms = timeout.as_millis() as u64, "issuing request");

        let mut request = self.http.request(method, url.clone()).timeout(timeout);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.authorize(request).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(url = %url, "401 from API, clearing stored session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }

        // Body reads share the request deadline, so a stalled body is
        // still classified as a timeout.
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&text)
                .ok()
                .and_then(|env| env.message);
            return Err(ApiError::ServerRejected {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&text).map_err(|e| ApiError::ServerRejected {
                status: status.as_u16(),
                message: Some(format!("malformed response body: {e}")),
            })?;

        if !envelope.success {
            return Err(ApiError::ServerRejected {
                status: status.as_u16(),
                message: envelope.message,
            });
        }

        Ok((status.as_u16(), envelope.data))
    }
}

/// A successful envelope whose `data` is absent, for an operation that
/// needs one, counts as a rejection.
fn require_data<T>((status, data): (u16, Option<T>)) -> Result<T, ApiError> {
    data.ok_or(ApiError::ServerRejected {
        status,
        message: None,
    })
}

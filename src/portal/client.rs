//! HTTP client for the PESU Academy portal.
//!
//! All course content is served by a single student profile controller
//! that switches on `actionType`. The client keeps an authenticated
//! session in its cookie store and exposes typed fetchers on top of the
//! scraped pages.

use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::portal::types::{Course, CourseContent, MaterialKind};
use crate::portal::{auth, scrape};

/// Public site root. All portal paths hang off this.
const PORTAL_BASE: &str = "https://www.pesuacademy.com/Academy";
/// Student profile controller serving course content fragments.
const CONTROLLER_PATH: &str = "/s/studentProfilePESUAdmin";
/// Menu id of the "My Courses" page.
const COURSES_MENU_ID: &str = "653";
/// Controller mode for course content requests.
const COURSES_CONTROLLER_MODE: &str = "6403";

// actionType values understood by the controller.
const ACTION_COURSE_LIST: &str = "38";
const ACTION_COURSE_UNITS: &str = "42";
const ACTION_UNIT_TOPICS: &str = "60";
const ACTION_TOPIC_MATERIALS: &str = "61";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Authenticated portal session.
pub struct PortalClient {
    client: Client,
    /// Base URL without a trailing slash, for building endpoint URLs.
    base_url: String,
    /// Parsed base, for resolving relative material hrefs.
    site_root: Url,
}

impl PortalClient {
    /// Creates a client against the production portal.
    pub fn new() -> Result<Self> {
        Self::with_base_url(PORTAL_BASE)
    }

    /// Creates a client against an arbitrary base URL.
    pub fn with_base_url(base: &str) -> Result<Self> {
        let site_root = Url::parse(base)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            base_url: base.trim_end_matches('/').to_string(),
            site_root,
        })
    }

    /// Logs in and stores the session cookie for subsequent requests.
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        auth::perform_login(self, credentials).await
    }

    /// Lists the courses offered in the given semester.
    pub async fn fetch_courses(&self, semester: u8) -> Result<Vec<Course>> {
        let html = self
            .controller_page(ACTION_COURSE_LIST, &[("id", COURSES_MENU_ID)])
            .await?;
        let options = scrape::semester_options(&html);
        let Some((_, batch_class_id)) = options.iter().find(|(number, _)| *number == semester)
        else {
            return Err(Error::NoMaterials(format!(
                "semester {} is not listed for this account",
                semester
            )));
        };

        let html = self
            .controller_page(
                ACTION_COURSE_LIST,
                &[("id", COURSES_MENU_ID), ("batchClassId", batch_class_id)],
            )
            .await?;
        let courses = scrape::course_rows(&html, semester);
        tracing::debug!("Semester {} lists {} courses", semester, courses.len());
        Ok(courses)
    }

    /// Finds a course by exact title (or course code) in the given semester.
    pub async fn find_course(&self, title: &str, semester: u8) -> Result<Course> {
        let courses = self.fetch_courses(semester).await?;
        courses
            .into_iter()
            .find(|course| course.title == title || course.code == title)
            .ok_or_else(|| Error::CourseNotFound {
                course: title.to_string(),
                semester,
            })
    }

    /// Fetches the full unit/topic/material tree for a course, restricted
    /// to materials of the given kind. Everything is collected up front so
    /// downloads never interleave with content requests.
    pub async fn fetch_course_content(
        &self,
        course: &Course,
        kind: MaterialKind,
    ) -> Result<CourseContent> {
        let html = self
            .controller_page(ACTION_COURSE_UNITS, &[("coursecontentid", course.id.as_str())])
            .await?;
        let mut units = scrape::unit_list(&html);
        tracing::debug!("Course '{}' has {} units", course.title, units.len());

        let kind_code = kind.code().to_string();
        for unit in &mut units {
            let html = self
                .controller_page(ACTION_UNIT_TOPICS, &[("unitid", unit.id.as_str())])
                .await?;
            unit.topics = scrape::topic_rows(&html);

            for topic in &mut unit.topics {
                let html = self
                    .controller_page(
                        ACTION_TOPIC_MATERIALS,
                        &[
                            ("selectedTopicId", topic.id.as_str()),
                            ("materialType", kind_code.as_str()),
                        ],
                    )
                    .await?;
                topic.materials = scrape::material_links(&html, &self.site_root, kind);
            }
        }

        Ok(CourseContent {
            course: course.clone(),
            units,
        })
    }

    /// Starts a download of a single material. The caller streams the body.
    pub async fn fetch_material(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Download(format!("HTTP {} fetching {}", status, url)));
        }
        Ok(response)
    }

    /// GETs a portal page and returns its body, mapping auth failures.
    pub(crate) async fn get_text(&self, path: &str) -> Result<String> {
        let url = self.endpoint(path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        self.read_page(response, &url).await
    }

    /// POSTs a form to a portal path.
    pub(crate) async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<Response> {
        let url = self.endpoint(path);
        tracing::debug!("POST {}", url);
        Ok(self.client.post(&url).form(form).send().await?)
    }

    /// GETs a content fragment from the student profile controller.
    async fn controller_page(&self, action: &str, extra: &[(&str, &str)]) -> Result<String> {
        let url = self.endpoint(CONTROLLER_PATH);
        let mut query = vec![
            ("menuId", COURSES_MENU_ID),
            ("controllerMode", COURSES_CONTROLLER_MODE),
            ("actionType", action),
        ];
        query.extend_from_slice(extra);

        tracing::debug!("GET {} actionType={}", url, action);
        let response = self.client.get(&url).query(&query).send().await?;
        self.read_page(response, &url).await
    }

    async fn read_page(&self, response: Response, url: &str) -> Result<String> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication(format!(
                "portal returned HTTP {}, session may have expired",
                status
            )));
        }
        if !status.is_success() {
            return Err(Error::Portal(format!("HTTP {} from {}", status, url)));
        }
        Ok(response.text().await?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LANDING_PAGE: &str = r#"<html><head>
        <meta name="csrf-token" content="tok-1"/>
    </head><body>
        <form action="/Academy/j_spring_security_check" method="post">
            <input name="j_username"/><input name="j_password"/>
        </form>
    </body></html>"#;

    const DASHBOARD_PAGE: &str =
        r#"<html><body><div class="dashboard">Welcome back</div></body></html>"#;

    const SEMESTER_PAGE: &str = r#"<html><body>
        <select id="batchClassId">
            <option value="2660">Sem-3</option>
            <option value="2661">Sem-4</option>
        </select>
    </body></html>"#;

    const COURSE_TABLE: &str = r#"<html><body>
        <table class="course-list"><tbody>
            <tr id="c1"><td>UE22CS252B</td><td>Data Structures</td></tr>
            <tr id="c2"><td>UE22CS251A</td><td>Digital Design</td></tr>
        </tbody></table>
    </body></html>"#;

    fn credentials() -> Credentials {
        Credentials {
            username: "alice".to_string(),
            password: "secret".to_string(),
        }
    }

    async fn mount_login(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LANDING_PAGE))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/j_spring_security_check"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DASHBOARD_PAGE))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_login_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LANDING_PAGE))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/j_spring_security_check"))
            .and(body_string_contains("j_username=alice"))
            .and(body_string_contains("_csrf=tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DASHBOARD_PAGE))
            .mount(&server)
            .await;

        let client = PortalClient::with_base_url(&server.uri()).unwrap();
        client.login(&credentials()).await.unwrap();
    }

    #[tokio::test]
    async fn test_login_rejected_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LANDING_PAGE))
            .mount(&server)
            .await;
        // A failed login redirects back to the login form.
        Mock::given(method("POST"))
            .and(path("/j_spring_security_check"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LANDING_PAGE))
            .mount(&server)
            .await;

        let client = PortalClient::with_base_url(&server.uri()).unwrap();
        let err = client.login(&credentials()).await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[tokio::test]
    async fn test_login_without_csrf_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
            .mount(&server)
            .await;

        let client = PortalClient::with_base_url(&server.uri()).unwrap();
        let err = client.login(&credentials()).await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[tokio::test]
    async fn test_fetch_courses_selects_semester() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        // More specific mock first: wiremock picks the first match in
        // mount order.
        Mock::given(method("GET"))
            .and(path("/s/studentProfilePESUAdmin"))
            .and(query_param("actionType", "38"))
            .and(query_param("batchClassId", "2660"))
            .respond_with(ResponseTemplate::new(200).set_body_string(COURSE_TABLE))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/s/studentProfilePESUAdmin"))
            .and(query_param("actionType", "38"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SEMESTER_PAGE))
            .mount(&server)
            .await;

        let client = PortalClient::with_base_url(&server.uri()).unwrap();
        client.login(&credentials()).await.unwrap();
        let courses = client.fetch_courses(3).await.unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].title, "Data Structures");
        assert_eq!(courses[0].semester, 3);
    }

    #[tokio::test]
    async fn test_fetch_courses_unknown_semester() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/s/studentProfilePESUAdmin"))
            .and(query_param("actionType", "38"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SEMESTER_PAGE))
            .mount(&server)
            .await;

        let client = PortalClient::with_base_url(&server.uri()).unwrap();
        let err = client.fetch_courses(7).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_find_course_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/s/studentProfilePESUAdmin"))
            .and(query_param("actionType", "38"))
            .and(query_param("batchClassId", "2660"))
            .respond_with(ResponseTemplate::new(200).set_body_string(COURSE_TABLE))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/s/studentProfilePESUAdmin"))
            .and(query_param("actionType", "38"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SEMESTER_PAGE))
            .mount(&server)
            .await;

        let client = PortalClient::with_base_url(&server.uri()).unwrap();
        let err = client.find_course("Quantum Computing", 3).await.unwrap_err();
        assert!(matches!(err, Error::CourseNotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_course_by_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/s/studentProfilePESUAdmin"))
            .and(query_param("actionType", "38"))
            .and(query_param("batchClassId", "2660"))
            .respond_with(ResponseTemplate::new(200).set_body_string(COURSE_TABLE))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/s/studentProfilePESUAdmin"))
            .and(query_param("actionType", "38"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SEMESTER_PAGE))
            .mount(&server)
            .await;

        let client = PortalClient::with_base_url(&server.uri()).unwrap();
        let course = client.find_course("UE22CS251A", 3).await.unwrap();
        assert_eq!(course.title, "Digital Design");
    }

    #[tokio::test]
    async fn test_fetch_course_content_builds_tree() {
        let server = MockServer::start().await;
        let units_page = r#"<ul class="courselist">
            <li class="courselist_expandable" id="u1"><a>Unit 1 : Basics</a></li>
            <li class="courselist_expandable" id="u2"><a>Unit 2 : Trees</a></li>
        </ul>"#;
        let topics_u1 = r#"<table class="topic-list"><tbody>
            <tr id="t1"><td>Arrays</td></tr>
        </tbody></table>"#;
        let topics_u2 = r#"<table class="topic-list"><tbody>
            <tr id="t2"><td>Binary Trees</td></tr>
        </tbody></table>"#;
        let materials_t1 = r#"<div class="material-list">
            <a href="/Academy/s/refContent/1001">Arrays Intro</a>
        </div>"#;
        let materials_t2 = r#"<div class="material-list">
            <a href="/Academy/s/refContent/2001">Tree Walks</a>
            <a href="/Academy/s/refContent/2002">Balancing</a>
        </div>"#;

        Mock::given(method("GET"))
            .and(path("/s/studentProfilePESUAdmin"))
            .and(query_param("actionType", "42"))
            .and(query_param("coursecontentid", "c1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(units_page))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/s/studentProfilePESUAdmin"))
            .and(query_param("actionType", "60"))
            .and(query_param("unitid", "u1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(topics_u1))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/s/studentProfilePESUAdmin"))
            .and(query_param("actionType", "60"))
            .and(query_param("unitid", "u2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(topics_u2))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/s/studentProfilePESUAdmin"))
            .and(query_param("actionType", "61"))
            .and(query_param("selectedTopicId", "t1"))
            .and(query_param("materialType", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(materials_t1))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/s/studentProfilePESUAdmin"))
            .and(query_param("actionType", "61"))
            .and(query_param("selectedTopicId", "t2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(materials_t2))
            .mount(&server)
            .await;

        let client = PortalClient::with_base_url(&server.uri()).unwrap();
        let course = Course {
            id: "c1".to_string(),
            code: "UE22CS252B".to_string(),
            title: "Data Structures".to_string(),
            semester: 3,
        };
        let content = client
            .fetch_course_content(&course, MaterialKind::Slides)
            .await
            .unwrap();

        assert_eq!(content.units.len(), 2);
        assert_eq!(content.units[0].topics[0].title, "Arrays");
        assert_eq!(content.units[1].topics[0].materials.len(), 2);
        let url = &content.units[0].topics[0].materials[0].url;
        assert_eq!(*url, format!("{}/Academy/s/refContent/1001", server.uri()));
    }

    #[tokio::test]
    async fn test_fetch_material_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/s/refContent/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = PortalClient::with_base_url(&server.uri()).unwrap();
        let url = format!("{}/s/refContent/404", server.uri());
        let err = client.fetch_material(&url).await.unwrap_err();
        assert!(matches!(err, Error::Download(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = PortalClient::with_base_url("https://example.com/Academy/").unwrap();
        assert_eq!(
            client.endpoint("/s/studentProfilePESUAdmin"),
            "https://example.com/Academy/s/studentProfilePESUAdmin"
        );
    }
}

use tracing::debug;

use crate::error::{FetchError, Result};
use crate::model::{Item, Page};
use crate::transport::{PageRequest, Transport};

pub const DEFAULT_API_BASE: &str = "https://api.miro.com";
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Board-scoped client settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub board_id: String,
    pub token: String,
    /// Page size requested on the first page of each container.
    pub page_limit: u32,
}

impl ClientConfig {
    pub fn new(board_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            board_id: board_id.into(),
            token: token.into(),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base", &self.api_base)
            .field("board_id", &self.board_id)
            .field("token", &"<redacted>")
            .field("page_limit", &self.page_limit)
            .finish()
    }
}

/// Lists the items of a board container, following cursor links.
pub struct ItemsClient<T> {
    transport: T,
    items_url: String,
    token: String,
    page_limit: u32,
}

impl<T: Transport> ItemsClient<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            transport,
            items_url: items_url(&config.api_base, &config.board_id)?,
            token: config.token.clone(),
            page_limit: config.page_limit,
        })
    }

    /// `{api_base}/v2/boards/{board_id}/items`
    pub fn items_url(&self) -> &str {
        &self.items_url
    }

    /// Fetch every item whose parent is `container_id`, in server order.
    ///
    /// The first request carries `parent_item_id` and `limit`; every later
    /// request is the server's `links.next` URL verbatim. The first failing
    /// page aborts the whole fetch.
    pub fn fetch_items(&self, container_id: &str) -> Result<Vec<Item>> {
        let mut request = PageRequest {
            url: self.items_url.clone(),
            query: vec![
                ("parent_item_id".to_string(), container_id.to_string()),
                ("limit".to_string(), self.page_limit.to_string()),
            ],
            bearer_token: self.token.clone(),
        };
        let mut items = Vec::new();
        let mut pages = 0usize;

        loop {
            pages += 1;
            let page = self.fetch_page(&request)?;
            let next = page.next_link().map(str::to_owned);
            debug!(
                container = container_id,
                page = pages,
                items = page.data.len(),
                has_next = next.is_some(),
                "fetched page"
            );
            items.extend(page.data);

            match next {
                Some(next) => {
                    request.url = next;
                    request.query.clear();
                }
                None => break,
            }
        }

        debug!(container = container_id, pages, total = items.len(), "container exhausted");
        Ok(items)
    }

    /// Issue one request and decode it as a [`Page`].
    pub fn fetch_page(&self, request: &PageRequest) -> Result<Page> {
        let response = self.transport.get(request)?;
        if !response.is_success() {
            return Err(FetchError::http(response.status, &request.url, &response.body));
        }
        serde_json::from_str(&response.body).map_err(|source| FetchError::MalformedResponse {
            url: request.url.clone(),
            source,
        })
    }
}

fn items_url(api_base: &str, board_id: &str) -> Result<String> {
    let invalid = |reason: String| FetchError::InvalidBaseUrl {
        url: api_base.to_string(),
        reason,
    };
    let mut url = reqwest::Url::parse(api_base).map_err(|err| invalid(err.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(["v2", "boards", board_id, "items"]);
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::model::ItemKind;
    use crate::transport::RawResponse;

    #[derive(Default)]
    struct ScriptedTransport {
        responses: RefCell<VecDeque<RawResponse>>,
        requests: RefCell<Vec<PageRequest>>,
    }

    impl ScriptedTransport {
        fn reply(self, status: u16, body: &str) -> Self {
            self.responses.borrow_mut().push_back(RawResponse {
                status,
                body: body.to_string(),
            });
            self
        }
    }

    impl Transport for ScriptedTransport {
        fn get(&self, request: &PageRequest) -> Result<RawResponse> {
            self.requests.borrow_mut().push(request.clone());
            Ok(self
                .responses
                .borrow_mut()
                .pop_front()
                .expect("unexpected extra request"))
        }
    }

    fn client(transport: &ScriptedTransport) -> ItemsClient<&ScriptedTransport> {
        let config = ClientConfig {
            api_base: "https://api.example".to_string(),
            ..ClientConfig::new("board-1", "tok")
        };
        ItemsClient::new(transport, &config).unwrap()
    }

    const NEXT: &str = "https://api.example/v2/boards/board-1/items?cursor=c2&limit=50";

    #[test]
    fn follows_next_link_verbatim() {
        let transport = ScriptedTransport::default()
            .reply(
                200,
                &format!(
                    r#"{{"data":[{{"id":"a","type":"text"}},{{"id":"b","type":"frame"}}],
                        "links":{{"next":"{NEXT}"}}}}"#
                ),
            )
            .reply(200, r#"{"data":[{"id":"c","type":"image"}],"links":{}}"#);

        let items = client(&transport).fetch_items("F1").unwrap();

        let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(items[1].kind, ItemKind::Frame);

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url, "https://api.example/v2/boards/board-1/items");
        assert_eq!(
            requests[0].query,
            vec![
                ("parent_item_id".to_string(), "F1".to_string()),
                ("limit".to_string(), "50".to_string()),
            ]
        );
        assert_eq!(requests[1].url, NEXT);
        assert!(requests[1].query.is_empty());
        assert!(requests.iter().all(|r| r.bearer_token == "tok"));
    }

    #[test]
    fn single_page_makes_one_request() {
        let transport = ScriptedTransport::default().reply(200, r#"{"data":[]}"#);
        let items = client(&transport).fetch_items("F1").unwrap();
        assert!(items.is_empty());
        assert_eq!(transport.requests.borrow().len(), 1);
    }

    #[test]
    fn non_success_status_aborts_without_partial_result() {
        let transport = ScriptedTransport::default()
            .reply(200, &format!(r#"{{"data":[{{"id":"a"}}],"links":{{"next":"{NEXT}"}}}}"#))
            .reply(429, r#"{"message":"slow down"}"#);

        let err = client(&transport).fetch_items("F1").unwrap_err();

        assert_eq!(err.status(), Some(429));
        match err {
            FetchError::Http { url, body, .. } => {
                assert_eq!(url, NEXT);
                assert!(body.contains("slow down"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.requests.borrow().len(), 2);
    }

    #[test]
    fn unparseable_body_is_malformed() {
        let transport = ScriptedTransport::default().reply(200, "<html>gateway</html>");
        let err = client(&transport).fetch_items("F1").unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse { .. }));

        let transport = ScriptedTransport::default().reply(200, r#"{"data":{"id":"a"}}"#);
        let err = client(&transport).fetch_items("F1").unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse { .. }));
    }

    #[test]
    fn items_url_keeps_base_path_and_board_segment() {
        assert_eq!(
            items_url("https://api.miro.com", "uXjVLg4ALQs=").unwrap(),
            "https://api.miro.com/v2/boards/uXjVLg4ALQs=/items"
        );
        assert_eq!(
            items_url("http://127.0.0.1:8080/proxy/", "b/1").unwrap(),
            "http://127.0.0.1:8080/proxy/v2/boards/b%2F1/items"
        );
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(matches!(
            items_url("not a url", "b"),
            Err(FetchError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            items_url("mailto:someone@example.com", "b"),
            Err(FetchError::InvalidBaseUrl { .. })
        ));
    }
}

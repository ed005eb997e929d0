use pokedex::gateway::{GatewayError, PokeApiGateway, PokemonGateway};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// A list page body with PokeAPI-style resource URLs.
fn page_body(names: &[&str], first_id: usize) -> serde_json::Value {
    let results: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "name": name,
                "url": format!("https://pokeapi.co/api/v2/pokemon/{}/", first_id + i),
            })
        })
        .collect();
    json!({ "count": 1302, "results": results })
}

fn bulbasaur_body() -> serde_json::Value {
    json!({
        "id": 1,
        "name": "bulbasaur",
        "height": 7,
        "weight": 69,
        "types": [
            { "slot": 1, "type": { "name": "grass", "url": "https://pokeapi.co/api/v2/type/12/" } },
            { "slot": 2, "type": { "name": "poison", "url": "https://pokeapi.co/api/v2/type/4/" } }
        ],
        "sprites": {
            "front_default": "https://img.example/front/1.png",
            "other": {
                "official-artwork": { "front_default": "https://img.example/artwork/1.png" }
            }
        }
    })
}

// ============================================================================
// fetch_list
// ============================================================================

#[tokio::test]
async fn test_fetch_list_first_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("limit", "20"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_body(&["bulbasaur", "ivysaur", "venusaur"], 1)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = PokeApiGateway::new(Some(mock_server.uri()));
    let list = assert_ok!(gateway.fetch_list().await);

    let names: Vec<&str> = list.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Bulbasaur", "Ivysaur", "Venusaur"]);
    let ids: Vec<u32> = list.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(list.iter().all(|p| !p.favorite && p.details.is_none()));
    assert_eq!(list[0].url, "https://pokeapi.co/api/v2/pokemon/1/");
}

#[tokio::test]
async fn test_fetch_list_honours_page_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["bulbasaur"], 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = PokeApiGateway::new(Some(mock_server.uri())).with_page_size(5);
    assert_eq!(assert_ok!(gateway.fetch_list().await).len(), 1);
}

#[tokio::test]
async fn test_fetch_list_empty_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&mock_server)
        .await;

    let gateway = PokeApiGateway::new(Some(mock_server.uri()));
    assert!(assert_ok!(gateway.fetch_list().await).is_empty());
}

#[tokio::test]
async fn test_fetch_list_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let gateway = PokeApiGateway::new(Some(mock_server.uri()));
    let error = assert_err!(gateway.fetch_list().await);
    assert_eq!(error, GatewayError::Http { status: 500 });
    assert_eq!(error.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn test_fetch_list_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json {"))
        .mount(&mock_server)
        .await;

    let gateway = PokeApiGateway::new(Some(mock_server.uri()));
    match assert_err!(gateway.fetch_list().await) {
        GatewayError::Network(msg) => assert!(msg.contains("malformed response")),
        other => panic!("Expected Network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_list_unreachable_host() {
    // Nothing listens on port 1
    let gateway = PokeApiGateway::new(Some("http://127.0.0.1:1".to_string()));
    assert!(matches!(
        gateway.fetch_list().await,
        Err(GatewayError::Network(_))
    ));
}

// ============================================================================
// fetch_details
// ============================================================================

#[tokio::test]
async fn test_fetch_details_maps_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon/bulbasaur"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bulbasaur_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = PokeApiGateway::new(Some(mock_server.uri()));
    // Display names are capitalized; the path must be lower case
    let details = assert_ok!(gateway.fetch_details("Bulbasaur").await);

    assert_eq!(details.id, 1);
    assert_eq!(details.name, "Bulbasaur");
    assert_eq!(details.height, 7);
    assert_eq!(details.weight, 69);
    assert_eq!(details.type_names(), vec!["grass", "poison"]);
    assert_eq!(
        details.artwork_url.as_deref(),
        Some("https://img.example/artwork/1.png")
    );
}

#[tokio::test]
async fn test_fetch_details_without_artwork() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon/missingno"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 0,
            "name": "missingno",
            "height": 10,
            "weight": 0,
            "types": []
        })))
        .mount(&mock_server)
        .await;

    let gateway = PokeApiGateway::new(Some(mock_server.uri()));
    let details = assert_ok!(gateway.fetch_details("missingno").await);
    assert!(details.types.is_empty());
    assert_eq!(details.artwork_url, None);
}

#[tokio::test]
async fn test_fetch_details_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon/notapokemon"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let gateway = PokeApiGateway::new(Some(mock_server.uri()));
    let error = assert_err!(gateway.fetch_details("notapokemon").await);
    assert_eq!(error, GatewayError::Http { status: 404 });
    assert!(error.to_string().contains("404"));
}

// ============================================================================
// load_more
// ============================================================================

#[tokio::test]
async fn test_load_more_uses_offset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["spearow", "fearow"], 21)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = PokeApiGateway::new(Some(mock_server.uri()));
    let page = assert_ok!(gateway.load_more(20).await);

    let ids: Vec<u32> = page.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![21, 22]);
    assert_eq!(page[1].name, "Fearow");
}

#[tokio::test]
async fn test_load_more_past_the_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("offset", "2000"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "count": 1302, "results": [] })),
        )
        .mount(&mock_server)
        .await;

    let gateway = PokeApiGateway::new(Some(mock_server.uri()));
    assert!(assert_ok!(gateway.load_more(2000).await).is_empty());
}

#[tokio::test]
async fn test_load_more_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = PokeApiGateway::new(Some(mock_server.uri()));
    let error = assert_err!(gateway.load_more(20).await);
    assert_eq!(error, GatewayError::Http { status: 404 });
    assert!(error.to_string().contains("404"));
}

use seed::{prelude::*, virtual_dom::AtValue, *};
use serde_wasm_bindgen::to_value;
use shared::{
    ApiError, Coordinate, ErrorKind, MapDisplay, Marker, SearchRequest, SearchState, present,
};
use wasm_bindgen::prelude::{JsValue, wasm_bindgen};

#[wasm_bindgen(module = "/leaflet_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    fn init_map();
    #[wasm_bindgen(js_name = clearMap)]
    fn clear_map();
    #[wasm_bindgen(js_name = renderMarkers)]
    fn render_markers_js(markers: JsValue);
    #[wasm_bindgen(js_name = renderRoute)]
    fn render_route_js(from: JsValue, to: JsValue);
}

fn api_root() -> String {
    if let Some(url) = option_env!("FRONTEND_API_ROOT") {
        return url.trim_end_matches('/').to_string();
    }
    "http://localhost:8080/api".to_string()
}

/// Leaflet map driven through `leaflet_map.js`.
struct LeafletDisplay;

impl MapDisplay for LeafletDisplay {
    fn clear(&mut self) {
        clear_map();
    }

    fn render_markers(&mut self, markers: &[Marker]) {
        if let Ok(value) = to_value(markers) {
            render_markers_js(value);
        }
    }

    fn render_route(&mut self, from: Coordinate, to: Coordinate) {
        if let (Ok(from_js), Ok(to_js)) = (to_value(&from), to_value(&to)) {
            render_route_js(from_js, to_js);
        }
    }
}

pub struct Model {
    form: SearchForm,
    pending: bool,
    last_state: Option<SearchState>,
    error: Option<ErrorKind>,
}

#[derive(Default, Clone)]
struct SearchForm {
    city1: String,
    city2: String,
}

impl SearchForm {
    /// Names go to the server exactly as typed; only blank input is refused.
    fn to_request(&self) -> Result<SearchRequest, ErrorKind> {
        if self.city1.trim().is_empty() || self.city2.trim().is_empty() {
            return Err(ErrorKind::MissingInput);
        }
        Ok(SearchRequest {
            city1: self.city1.clone(),
            city2: self.city2.clone(),
        })
    }
}

pub enum Msg {
    City1Changed(String),
    City2Changed(String),
    Submit,
    SearchFetched(Result<SearchState, ErrorKind>),
}

pub fn init(_: Url, _: &mut impl Orders<Msg>) -> Model {
    Model {
        form: SearchForm::default(),
        pending: false,
        last_state: None,
        error: None,
    }
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::City1Changed(val) => model.form.city1 = val,
        Msg::City2Changed(val) => model.form.city2 = val,
        Msg::Submit => {
            if model.pending {
                return;
            }
            match model.form.to_request() {
                Ok(payload) => {
                    model.pending = true;
                    model.error = None;
                    orders.perform_cmd(send_search_request(payload));
                }
                Err(kind) => fail(model, kind),
            }
        }
        Msg::SearchFetched(result) => {
            model.pending = false;
            match result {
                Ok(state) => {
                    present(&mut LeafletDisplay, &state);
                    model.last_state = Some(state);
                    model.error = None;
                }
                Err(kind) => fail(model, kind),
            }
        }
    }
}

// Any failure wipes the map so no marker from an earlier pair lingers.
fn fail(model: &mut Model, kind: ErrorKind) {
    LeafletDisplay.clear();
    model.last_state = None;
    model.error = Some(kind);
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(kind.user_message());
    }
}

async fn send_search_request(payload: SearchRequest) -> Msg {
    web_sys::console::debug_1(
        &format!(
            "[frontend] searching {:?} -> {:?}",
            payload.city1, payload.city2
        )
        .into(),
    );
    let url = format!("{}/search", api_root());
    let response = match Request::new(url).method(Method::Post).json(&payload) {
        Err(err) => Err(unavailable(err)),
        Ok(request) => match request.fetch().await {
            Err(err) => Err(unavailable(err)),
            Ok(raw) => {
                if raw.status().is_ok() {
                    raw.json::<SearchState>().await.map_err(unavailable)
                } else {
                    match raw.json::<ApiError>().await {
                        Ok(api_error) => Err(api_error.kind),
                        Err(err) => Err(unavailable(err)),
                    }
                }
            }
        },
    };

    Msg::SearchFetched(response)
}

fn unavailable(err: impl std::fmt::Debug) -> ErrorKind {
    web_sys::console::error_1(&format!("[frontend] search request failed: {err:?}").into());
    ErrorKind::ServiceUnavailable
}

fn distance_text(state: &SearchState) -> Option<String> {
    state
        .route
        .map(|route| format!("Distance: {} km", route.distance_km))
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        C!["map-wrapper"],
        h2![C!["map-title"], "City Distance Calculator"],
        view_form(model),
        view_result(model),
    ]
}

fn view_form(model: &Model) -> Node<Msg> {
    let city_input = |placeholder: &str, value: &str, msg: fn(String) -> Msg| {
        input![
            attrs! {
                At::Type => "text",
                At::Placeholder => placeholder,
                At::Value => value,
                At::AutoComplete => "off",
            },
            input_ev(Ev::Input, msg),
        ]
    };

    form![
        C!["search-container"],
        city_input("Enter first city", &model.form.city1, Msg::City1Changed),
        city_input("Enter second city", &model.form.city2, Msg::City2Changed),
        button![
            "Find Distance",
            ev(Ev::Click, |event| {
                event.prevent_default();
                Msg::Submit
            }),
            attrs! { At::Disabled => bool_attr(model.pending) },
        ],
    ]
}

fn view_result(model: &Model) -> Node<Msg> {
    if let Some(kind) = model.error {
        return p![C!["error"], kind.user_message()];
    }
    match model.last_state.as_ref().and_then(distance_text) {
        Some(text) => p![C!["distance-text"], text],
        None => empty![],
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    init_map();
    App::start("app", init, update, view);
}

fn bool_attr(value: bool) -> AtValue {
    if value {
        AtValue::Some("true".into())
    } else {
        AtValue::Ignored
    }
}

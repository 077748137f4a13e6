//! The `DevtoolsPanel` component of the generated module.
//!
//! The component is always emitted. It reads the module-level `DEBUG`
//! constant and renders nothing when it is false, after its hooks ran, so
//! hook order stays stable.

use crate::codegen::element::Element;
use crate::codegen::{Expr, Function, Node, PropValue, Stmt};
use serde_json::{json, Value};

pub const PANEL_COMPONENT: &str = "DevtoolsPanel";

const STATE_HOOKS: &str = r#"
const map = useMap();
const initialView = useRef(null);
const [loaded, setLoaded] = useState(false);
const [zoom, setZoom] = useState(null);
const [center, setCenter] = useState(null);
const [bounds, setBounds] = useState(null);
const [heading, setHeading] = useState(0);
const [tilt, setTilt] = useState(0);
const [mouseLatLng, setMouseLatLng] = useState(null);
const [clickedLatLng, setClickedLatLng] = useState(null);
const [placeName, setPlaceName] = useState(null);
"#;

const SUBSCRIPTIONS: &str = r#"
useEffect(() => {
  if (!map) return;
  setLoaded(true);

  const readView = () => {
    const c = map.getCenter();
    return {
      center: c ? c.toJSON() : null,
      zoom: map.getZoom() ?? null,
      heading: map.getHeading() ?? 0,
      tilt: map.getTilt() ?? 0,
    };
  };

  const view = readView();
  if (!initialView.current && view.center) initialView.current = view;
  setCenter(view.center);
  setZoom(view.zoom);
  setHeading(view.heading);
  setTilt(view.tilt);

  const listeners = [
    map.addListener("mousemove", (e) => {
      if (e.latLng) setMouseLatLng(e.latLng.toJSON());
    }),
    map.addListener("click", (e) => {
      if (!e.latLng) return;
      const point = e.latLng.toJSON();
      setClickedLatLng(point);
      new google.maps.Geocoder().geocode({ location: point }, (results, status) => {
        if (status === "OK" && results && results[0]) {
          setPlaceName(results[0].formatted_address);
        } else {
          setPlaceName("Not found");
        }
      });
    }),
    map.addListener("zoom_changed", () => {
      setZoom(map.getZoom() ?? null);
    }),
    map.addListener("center_changed", () => {
      const c = map.getCenter();
      if (!c) return;
      setCenter(c.toJSON());
      if (!initialView.current) initialView.current = readView();
    }),
    map.addListener("bounds_changed", () => {
      const b = map.getBounds();
      if (b) setBounds(b.toJSON());
    }),
    map.addListener("heading_changed", () => {
      setHeading(map.getHeading() ?? 0);
    }),
    map.addListener("tilt_changed", () => {
      setTilt(map.getTilt() ?? 0);
    }),
  ];

  return () => {
    listeners.forEach((listener) => google.maps.event.removeListener(listener));
  };
}, [map]);
"#;

const ACTIONS: &str = r#"
const formatLatLng = (p) => (p ? `${p.lat.toFixed(5)}, ${p.lng.toFixed(5)}` : "-");

const formatBounds = (b) =>
  b ? `${b.south.toFixed(4)}, ${b.west.toFixed(4)} / ${b.north.toFixed(4)}, ${b.east.toFixed(4)}` : "-";

const copyText = (text, label) => {
  if (!navigator.clipboard) return;
  navigator.clipboard.writeText(text).then(() => console.info(`[google-maps devtools] ${label} copied`));
};

const copyCoords = () => {
  if (!clickedLatLng) return;
  copyText(`${clickedLatLng.lat}, ${clickedLatLng.lng}`, "coordinates");
};

const copyConfig = () => {
  if (!map) return;
  const c = map.getCenter();
  const config = {
    defaultCenter: c ? c.toJSON() : null,
    defaultZoom: map.getZoom() ?? null,
    heading: map.getHeading() ?? 0,
    tilt: map.getTilt() ?? 0,
  };
  copyText(JSON.stringify(config, null, 2), "map config");
};

const recenter = () => {
  if (!map || !navigator.geolocation) return;
  navigator.geolocation.getCurrentPosition((position) => {
    map.panTo({ lat: position.coords.latitude, lng: position.coords.longitude });
  });
};

const resetView = () => {
  const view = initialView.current;
  if (!map || !view) return;
  if (view.center) map.setCenter(view.center);
  if (view.zoom != null) map.setZoom(view.zoom);
  map.setHeading(view.heading);
  map.setTilt(view.tilt);
};
"#;

const DEBUG_GUARD: &str = "if (!DEBUG) return null;";

fn panel_style() -> Value {
    json!({
        "position": "fixed",
        "bottom": "10px",
        "right": "10px",
        "padding": "12px",
        "background": "#0009",
        "color": "white",
        "borderRadius": "8px",
        "fontSize": "12px",
        "zIndex": 999999,
        "width": "300px",
        "lineHeight": "1.4",
        "backdropFilter": "blur(4px)",
    })
}

fn button(label: &str, on_click: &'static str, background: &str) -> Element {
    Element::intrinsic("button")
        .style(json!({
            "flex": "1 1 45%",
            "padding": "4px",
            "background": background,
            "color": "#000",
            "border": "none",
            "borderRadius": "4px",
            "cursor": "pointer",
        }))
        .prop("onClick", PropValue::Expr(on_click))
        .text(label)
}

fn row(expr: &'static str) -> Node {
    Node::Element(Element::intrinsic("div").expr(expr))
}

fn panel() -> Element {
    let title = Element::intrinsic("div")
        .style(json!({"fontWeight": "bold", "fontSize": "16px", "marginBottom": "5px"}))
        .text("Google Maps Devtools");

    let actions = Element::intrinsic("div")
        .style(json!({"display": "flex", "flexWrap": "wrap", "gap": "4px", "marginTop": "8px"}))
        .child(Node::When(
            "clickedLatLng",
            button("Copy coordinates", "copyCoords", "#22c55e"),
        ))
        .child(Node::Element(button("Copy config", "copyConfig", "#38bdf8")))
        .child(Node::Element(button("My location", "recenter", "#facc15")))
        .child(Node::Element(button("Reset view", "resetView", "#f87171")));

    Element::intrinsic("div")
        .style(panel_style())
        .child(Node::Element(title))
        .child(row(r#""API Key: " + API_KEY_PREVIEW"#))
        .child(row(r#""Libraries: " + LIBRARIES"#))
        .child(row(r#""Map loaded: " + (loaded ? "Yes" : "No")"#))
        .child(Node::Element(Element::intrinsic("hr")))
        .child(row(r#""Zoom: " + (zoom ?? "-")"#))
        .child(row(r#""Center: " + formatLatLng(center)"#))
        .child(row(r#""Bounds: " + formatBounds(bounds)"#))
        .child(row(r#""Heading / tilt: " + heading + "° / " + tilt + "°""#))
        .child(row(r#""Mouse: " + formatLatLng(mouseLatLng)"#))
        .child(row(r#""Click: " + formatLatLng(clickedLatLng)"#))
        .child(row(r#""Place: " + (placeName ?? "-")"#))
        .child(Node::Element(actions))
}

pub fn devtools_panel() -> Function {
    Function::new(PANEL_COMPONENT)
        .stmt(Stmt::Code(STATE_HOOKS))
        .stmt(Stmt::Code(SUBSCRIPTIONS))
        .stmt(Stmt::Code(ACTIONS))
        .stmt(Stmt::Code(DEBUG_GUARD))
        .stmt(Stmt::Return(Expr::Element(panel())))
}

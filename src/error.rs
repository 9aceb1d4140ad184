use std::path::PathBuf;

#[derive(Debug)]
pub enum RouteMapError {
    XmlParse(quick_xml::Error),
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
    Json(serde_json::Error),
    Io(std::io::Error),
    MissingInputDir(PathBuf),
    NoCandidateFiles(PathBuf),
    NoUsableRoutes,
}

impl std::fmt::Display for RouteMapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::XmlParse(e) => write!(f, "XML parse error: {e}"),
            Self::MissingAttribute { element, attribute } => {
                write!(f, "Missing attribute '{attribute}' on <{element}>")
            }
            Self::InvalidAttribute {
                element,
                attribute,
                value,
            } => write!(
                f,
                "Invalid value '{value}' for attribute '{attribute}' on <{element}>"
            ),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MissingInputDir(p) => {
                write!(f, "Input directory not found: {}", p.display())
            }
            Self::NoCandidateFiles(p) => {
                write!(f, "No .gpx files found in {}", p.display())
            }
            Self::NoUsableRoutes => write!(f, "No input file yielded a usable route"),
        }
    }
}

impl std::error::Error for RouteMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::XmlParse(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for RouteMapError {
    fn from(e: quick_xml::Error) -> Self {
        Self::XmlParse(e)
    }
}

impl From<serde_json::Error> for RouteMapError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for RouteMapError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<RouteMapError> for wasm_bindgen::JsValue {
    fn from(e: RouteMapError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

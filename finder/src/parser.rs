//! Recent projects record parser.
//!
//! This module decodes an IDE's `recentProjects.xml` (or `recentSolutions.xml`)
//! into [`ProjectRecord`]s. Decoding is declarative: the document shape is a
//! set of `serde` structs read by `quick-xml`, and normalization happens on
//! the decoded values.
//!
//! # Record Format
//!
//! ```xml
//! <application>
//!   <component name="RecentProjectsManager">
//!     <option name="additionalInfo">
//!       <map>
//!         <entry key="$USER_HOME$/code/myrepo">
//!           <value>
//!             <RecentProjectMetaInfo frameTitle="myrepo – main.go" opened="true">
//!               <option name="build" value="GO-231.9011.35" />
//!               <option name="productionCode" value="GO" />
//!               <option name="buildTimestamp" value="1687789200000" />
//!               <option name="projectOpenTimestamp" value="1690000000000" />
//!             </RecentProjectMetaInfo>
//!           </value>
//!         </entry>
//!       </map>
//!     </option>
//!   </component>
//! </application>
//! ```
//!
//! # Field Mapping
//!
//! | Source | Record field | Notes |
//! |--------|--------------|-------|
//! | `entry@key` | `path` | `$USER_HOME$` replaced with the home directory |
//! | `frameTitle` | `identity.name` | text before ` – ` (en dash), trimmed |
//! | `build` | `build.build_number` | `<productionCode>-` prefix removed |
//! | `productionCode` | `build.production_code` | |
//! | `buildTimestamp` | `build_timestamp` | milliseconds to seconds, `0` if unparsable |
//! | `projectOpenTimestamp` | `last_opened` | milliseconds to seconds, `0` if unparsable |
//! | `opened` | `opened` | case-insensitive `"true"` |

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::types::{is_known_product_code, BuildDetails, ProjectIdentity, ProjectRecord};

/// Placeholder the IDE writes in place of the user's home directory.
pub const HOME_PLACEHOLDER: &str = "$USER_HOME$";

/// Separator between the project name and the rest of a frame title (U+2013).
pub const TITLE_SEPARATOR: char = '\u{2013}';

static TITLE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\s{TITLE_SEPARATOR}\s.*")).expect("valid pattern")
});

static DOT_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*/\..*").expect("valid pattern"));

/// Errors that can occur during parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The document is not well-formed XML or does not fit the record schema.
    #[error("invalid XML: {0}")]
    InvalidXml(#[from] quick_xml::de::DeError),
}

/// Root `<application>` element.
#[derive(Debug, Default, Deserialize)]
struct ApplicationXml {
    #[serde(rename = "component", default)]
    components: Vec<ComponentXml>,
}

#[derive(Debug, Default, Deserialize)]
struct ComponentXml {
    #[serde(rename = "option", default)]
    options: Vec<ComponentOptionXml>,
}

/// A component-level `<option>`; only those holding a `<map>` carry entries.
#[derive(Debug, Default, Deserialize)]
struct ComponentOptionXml {
    #[serde(default)]
    map: Option<MapXml>,
}

#[derive(Debug, Default, Deserialize)]
struct MapXml {
    #[serde(rename = "entry", default)]
    entries: Vec<EntryXml>,
}

#[derive(Debug, Default, Deserialize)]
struct EntryXml {
    #[serde(rename = "@key", default)]
    key: String,

    #[serde(rename = "value", default)]
    values: Vec<ValueXml>,
}

#[derive(Debug, Default, Deserialize)]
struct ValueXml {
    #[serde(rename = "RecentProjectMetaInfo", default)]
    meta: MetaInfoXml,
}

#[derive(Debug, Default, Deserialize)]
struct MetaInfoXml {
    #[serde(rename = "@frameTitle", default)]
    frame_title: String,

    #[serde(rename = "@opened", default)]
    opened: String,

    #[serde(rename = "option", default)]
    options: OptionList,
}

/// Named `<option name=".." value=".."/>` children of a metadata block.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct OptionList(Vec<NamedOption>);

#[derive(Debug, Default, Deserialize)]
struct NamedOption {
    #[serde(rename = "@name", default)]
    name: String,

    #[serde(rename = "@value", default)]
    value: String,
}

impl OptionList {
    /// Returns the value of the first option called `name`, or `""` if absent.
    #[must_use]
    pub fn value(&self, name: &str) -> &str {
        self.0
            .iter()
            .find(|option| option.name == name)
            .map_or("", |option| option.value.as_str())
    }
}

/// Parses a record file's bytes into one [`ProjectRecord`] per `entry/value`
/// pair, in document order.
///
/// # Arguments
///
/// * `bytes` - Raw file contents
/// * `application` - Owning application identifier for every record
/// * `home_dir` - Substituted for [`HOME_PLACEHOLDER`] in project paths
///
/// # Errors
///
/// Returns [`ParseError::InvalidXml`] if the document cannot be decoded.
pub fn parse_records(
    bytes: &[u8],
    application: &str,
    home_dir: &str,
) -> Result<Vec<ProjectRecord>, ParseError> {
    let document: ApplicationXml = quick_xml::de::from_reader(bytes)?;
    let mut records = Vec::new();

    let entries = document
        .components
        .iter()
        .flat_map(|component| &component.options)
        .filter_map(|option| option.map.as_ref())
        .flat_map(|map| &map.entries);

    for entry in entries {
        let path = entry.key.replace(HOME_PLACEHOLDER, home_dir);

        for value in &entry.values {
            records.push(build_record(&value.meta, application, &path));
        }
    }

    Ok(records)
}

fn build_record(meta: &MetaInfoXml, application: &str, path: &str) -> ProjectRecord {
    let production_code = meta.options.value("productionCode");
    if !production_code.is_empty() && !is_known_product_code(production_code) {
        debug!(
            production_code = %production_code,
            path = %path,
            "Unknown product code"
        );
    }

    ProjectRecord {
        identity: ProjectIdentity::new(display_name(&meta.frame_title, path), application),
        path: path.to_string(),
        build_timestamp: millis_to_secs(meta.options.value("buildTimestamp")),
        last_opened: millis_to_secs(meta.options.value("projectOpenTimestamp")),
        build: BuildDetails {
            build_number: bare_build_number(meta.options.value("build"), production_code),
            production_code: production_code.to_string(),
        },
        opened: meta.opened.eq_ignore_ascii_case("true"),
    }
}

/// Removes a trailing `" – anything"` from a frame title and trims it.
///
/// # Examples
///
/// ```
/// use jbrecents_finder::parser::strip_title_suffix;
///
/// assert_eq!(strip_title_suffix("myrepo – main.go"), "myrepo");
/// assert_eq!(strip_title_suffix("  myrepo  "), "myrepo");
/// ```
#[must_use]
pub fn strip_title_suffix(title: &str) -> String {
    TITLE_SUFFIX.replace_all(title, "").trim().to_string()
}

/// Derives a non-empty display name from a frame title.
///
/// Falls back to the dot-segment rule when the title holds nothing before
/// its separator, and to the project directory name when that is empty too.
#[must_use]
pub fn display_name(title: &str, project_path: &str) -> String {
    let name = strip_title_suffix(title);
    if !name.is_empty() {
        return name;
    }

    let name = DOT_SEGMENT.replace_all(title, "").trim().to_string();
    if !name.is_empty() {
        return name;
    }

    Path::new(project_path.trim_end_matches(['/', '\\']))
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| project_path.to_string())
}

/// Converts a millisecond timestamp string to seconds, `0` if unparsable.
#[must_use]
pub fn millis_to_secs(raw: &str) -> i64 {
    raw.parse::<i64>().map_or(0, |millis| millis / 1000)
}

/// Removes a `<production_code>-` prefix from a build string.
#[must_use]
pub fn bare_build_number(build: &str, production_code: &str) -> String {
    build
        .strip_prefix(&format!("{production_code}-"))
        .unwrap_or(build)
        .to_string()
}

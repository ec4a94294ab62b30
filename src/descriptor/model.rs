use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::package::PackageUnit;
use crate::parent::ParentApplication;

/// Root label every full menu path starts with.
pub const MENU_ROOT: &str = "Meco";

const DEFAULT_VERSION: Version = Version {
    major: 1,
    minor: 0,
    fix: 0,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub fix: u32,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.fix)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Developer {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub web: String,
}

impl Developer {
    /// Labelled fields in display order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("Username", self.user_name.as_str()),
            ("Name", self.name.as_str()),
            ("Email", self.email.as_str()),
            ("Web", self.web.as_str()),
        ]
    }
}

/// Author-declared application settings. Unset fields fall back to the
/// defaults applied by [`ApplicationDescriptor::new`].
///
/// The string fields that may be cleared carry two layers of `Option`: the
/// outer one records whether the field was set at all, so an explicit `null`
/// still shadows an inherited value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationInfo {
    pub name: Option<String>,
    pub version_major: Option<u32>,
    pub version_minor: Option<u32>,
    pub version_fix: Option<u32>,
    pub is_active: Option<bool>,
    pub description: Option<String>,
    #[serde(deserialize_with = "explicit", skip_serializing_if = "Option::is_none")]
    pub icon_file_name: Option<Option<String>>,
    pub use_platform_icon: Option<bool>,
    pub parent_applications: Option<Vec<ParentApplication>>,
    pub keywords: Option<Vec<String>>,
    pub is_gui: Option<bool>,
    pub run_as_panel_in_nuke: Option<bool>,
    pub documents: Option<Vec<Document>>,
    #[serde(deserialize_with = "explicit", skip_serializing_if = "Option::is_none")]
    pub python_command: Option<Option<String>>,
    #[serde(deserialize_with = "explicit", skip_serializing_if = "Option::is_none")]
    pub command: Option<Option<String>>,
    #[serde(deserialize_with = "explicit", skip_serializing_if = "Option::is_none")]
    pub menu_path: Option<Option<String>>,
    pub menu_separator_before: Option<bool>,
    pub menu_separator_after: Option<bool>,
    pub developers: Option<Vec<Developer>>,
}

impl ApplicationInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Fill every unset field from `base`. Fields already set on `self` win.
    pub fn inherit(self, base: &ApplicationInfo) -> Self {
        let base = base.clone();
        Self {
            name: self.name.or(base.name),
            version_major: self.version_major.or(base.version_major),
            version_minor: self.version_minor.or(base.version_minor),
            version_fix: self.version_fix.or(base.version_fix),
            is_active: self.is_active.or(base.is_active),
            description: self.description.or(base.description),
            icon_file_name: self.icon_file_name.or(base.icon_file_name),
            use_platform_icon: self.use_platform_icon.or(base.use_platform_icon),
            parent_applications: self.parent_applications.or(base.parent_applications),
            keywords: self.keywords.or(base.keywords),
            is_gui: self.is_gui.or(base.is_gui),
            run_as_panel_in_nuke: self.run_as_panel_in_nuke.or(base.run_as_panel_in_nuke),
            documents: self.documents.or(base.documents),
            python_command: self.python_command.or(base.python_command),
            command: self.command.or(base.command),
            menu_path: self.menu_path.or(base.menu_path),
            menu_separator_before: self.menu_separator_before.or(base.menu_separator_before),
            menu_separator_after: self.menu_separator_after.or(base.menu_separator_after),
            developers: self.developers.or(base.developers),
        }
    }

    pub fn version(mut self, major: u32, minor: u32, fix: u32) -> Self {
        self.version_major = Some(major);
        self.version_minor = Some(minor);
        self.version_fix = Some(fix);
        self
    }

    pub fn active(mut self, yes: bool) -> Self {
        self.is_active = Some(yes);
        self
    }

    pub fn gui(mut self, yes: bool) -> Self {
        self.is_gui = Some(yes);
        self
    }

    pub fn parents(mut self, parents: impl IntoIterator<Item = ParentApplication>) -> Self {
        self.parent_applications = Some(parents.into_iter().collect());
        self
    }

    pub fn keywords<S: Into<String>>(mut self, keywords: impl IntoIterator<Item = S>) -> Self {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    pub fn menu_path(mut self, path: impl Into<String>) -> Self {
        self.menu_path = Some(Some(path.into()));
        self
    }

    pub fn icon_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.icon_file_name = Some(Some(file_name.into()));
        self
    }

    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(Some(command.into()));
        self
    }
}

// A present key, `null` included, deserializes to `Some`; absent keys stay
// `None` through `#[serde(default)]`.
fn explicit<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Resolved metadata for one discoverable application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApplicationDescriptor {
    name: String,
    version: Version,
    version_string: String,
    window_title: String,
    is_active: bool,
    description: String,
    icon_file_name: Option<String>,
    use_platform_icon: bool,
    parent_applications: Vec<ParentApplication>,
    keywords: Vec<String>,
    is_gui: bool,
    run_as_panel_in_nuke: bool,
    documents: Vec<Document>,
    python_command: Option<String>,
    command: Option<String>,
    menu_path: Option<String>,
    full_menu_path: String,
    menu_separator_before: bool,
    menu_separator_after: bool,
    developers: Vec<Developer>,
    package: Option<PackageUnit>,
}

impl ApplicationDescriptor {
    pub fn new(info: ApplicationInfo) -> Self {
        let version = Version {
            major: info.version_major.unwrap_or(DEFAULT_VERSION.major),
            minor: info.version_minor.unwrap_or(DEFAULT_VERSION.minor),
            fix: info.version_fix.unwrap_or(DEFAULT_VERSION.fix),
        };
        let name = info.name.unwrap_or_default();
        let is_gui = info.is_gui.unwrap_or(false);
        let version_string = version.to_string();
        let window_title = format!("{name} - {version_string}");
        let menu_path = info.menu_path.flatten();
        let full_menu_path = full_menu_path(menu_path.as_deref(), &window_title, is_gui);

        Self {
            name,
            version,
            version_string,
            window_title,
            is_active: info.is_active.unwrap_or(true),
            description: info.description.unwrap_or_default(),
            icon_file_name: info.icon_file_name.flatten(),
            use_platform_icon: info.use_platform_icon.unwrap_or(false),
            parent_applications: info
                .parent_applications
                .unwrap_or_else(|| vec![ParentApplication::All]),
            keywords: info.keywords.unwrap_or_default(),
            is_gui,
            run_as_panel_in_nuke: info.run_as_panel_in_nuke.unwrap_or(false),
            documents: info.documents.unwrap_or_default(),
            python_command: info.python_command.flatten(),
            command: info.command.flatten(),
            menu_path,
            full_menu_path,
            menu_separator_before: info.menu_separator_before.unwrap_or(false),
            menu_separator_after: info.menu_separator_after.unwrap_or(false),
            developers: info.developers.unwrap_or_default(),
            package: None,
        }
    }

    /// Attach the package the descriptor was discovered in.
    pub fn with_package(mut self, package: PackageUnit) -> Self {
        self.package = Some(package);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn version_major(&self) -> u32 {
        self.version.major
    }

    pub fn version_minor(&self) -> u32 {
        self.version.minor
    }

    pub fn version_fix(&self) -> u32 {
        self.version.fix
    }

    pub fn version_string(&self) -> &str {
        &self.version_string
    }

    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon_file_name(&self) -> Option<&str> {
        self.icon_file_name.as_deref()
    }

    pub fn use_platform_icon(&self) -> bool {
        self.use_platform_icon
    }

    pub fn parent_applications(&self) -> &[ParentApplication] {
        &self.parent_applications
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_gui(&self) -> bool {
        self.is_gui
    }

    pub fn run_as_panel_in_nuke(&self) -> bool {
        self.run_as_panel_in_nuke
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn python_command(&self) -> Option<&str> {
        self.python_command.as_deref()
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn menu_path(&self) -> Option<&str> {
        self.menu_path.as_deref()
    }

    pub fn full_menu_path(&self) -> &str {
        &self.full_menu_path
    }

    pub fn menu_separator_before(&self) -> bool {
        self.menu_separator_before
    }

    pub fn menu_separator_after(&self) -> bool {
        self.menu_separator_after
    }

    pub fn developers(&self) -> &[Developer] {
        &self.developers
    }

    pub fn package(&self) -> Option<&PackageUnit> {
        self.package.as_ref()
    }

    pub fn parent_applications_as_string(&self) -> String {
        self.parent_applications
            .iter()
            .map(ParentApplication::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn keywords_as_string(&self) -> String {
        self.keywords.join(", ")
    }

    pub fn developer_user_names_as_string(&self) -> String {
        self.developers
            .iter()
            .map(|dev| dev.user_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn developer_emails_as_string(&self) -> String {
        self.developers
            .iter()
            .map(|dev| dev.email.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<ApplicationInfo> for ApplicationDescriptor {
    fn from(info: ApplicationInfo) -> Self {
        ApplicationDescriptor::new(info)
    }
}

fn full_menu_path(menu_path: Option<&str>, window_title: &str, is_gui: bool) -> String {
    let Some(menu_path) = menu_path.filter(|path| !path.is_empty()) else {
        return String::new();
    };
    let mut segments: Vec<String> = vec![MENU_ROOT.to_string()];
    segments.extend(
        menu_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string),
    );
    if is_gui {
        segments.push(format!("{window_title}..."));
    } else {
        segments.push(window_title.to_string());
    }
    segments.join("/")
}

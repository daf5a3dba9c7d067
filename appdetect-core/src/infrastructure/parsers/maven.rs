//! Maven `pom.xml` descriptor parser

use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::application::errors::ParseError;
use crate::domain::{
    Dependency, DependencyScope, Descriptor, ParentReference, Plugin, Profile, Property,
};

/// Parser for Maven pom.xml files
///
/// Walks the quick-xml event stream keeping a stack of element names and maps
/// each closed element onto the descriptor tree. Elements the descriptor model
/// does not know about are skipped, so plugin configuration, reporting blocks and
/// similar never affect the result.
pub struct MavenParser;

impl Default for MavenParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MavenParser {
    pub fn new() -> Self {
        Self
    }

    pub fn supports_file(&self, filename: &str) -> bool {
        filename == "pom.xml"
    }

    /// Read and parse a descriptor file, recording its location
    pub fn parse_file(&self, path: &Path) -> Result<Descriptor, ParseError> {
        let content = std::fs::read_to_string(path)?;
        self.parse_str(&content, Some(path.to_path_buf()))
    }

    /// Parse descriptor text. `path` is stored on the result as-is.
    pub fn parse_str(&self, content: &str, path: Option<PathBuf>) -> Result<Descriptor, ParseError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut state = ParseState::default();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                    state.open(name)?;
                }
                Ok(Event::Empty(e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                    state.open(name)?;
                    state.close();
                }
                Ok(Event::End(_)) => state.close(),
                Ok(Event::Text(t)) => {
                    let text = t.unescape().map_err(|e| ParseError::Xml {
                        message: e.to_string(),
                        position: reader.buffer_position() as u64,
                    })?;
                    state.text.push_str(&text);
                }
                Ok(Event::CData(c)) => {
                    state.text.push_str(&String::from_utf8_lossy(&c));
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ParseError::Xml {
                        message: e.to_string(),
                        position: reader.error_position() as u64,
                    });
                }
                _ => {}
            }
            buf.clear();
        }

        state.finish(path)
    }
}

#[derive(Default)]
struct DependencyBuilder {
    group_id: String,
    artifact_id: String,
    version: String,
    scope: String,
}

impl DependencyBuilder {
    fn build(self) -> Dependency {
        Dependency::new(
            self.group_id,
            self.artifact_id,
            self.version,
            DependencyScope::parse(&self.scope),
        )
    }
}

/// Lists shared by the project root and `<profile>` blocks
struct Fragment<'a> {
    properties: &'a mut Vec<Property>,
    dependencies: &'a mut Vec<Dependency>,
    managed_dependencies: &'a mut Vec<Dependency>,
    plugins: &'a mut Vec<Plugin>,
}

#[derive(Default)]
struct ParseState {
    stack: Vec<String>,
    text: String,
    seen_root: bool,
    descriptor: Descriptor,
    dependency: Option<DependencyBuilder>,
    plugin: Option<Plugin>,
    profile: Option<Profile>,
}

impl ParseState {
    fn open(&mut self, name: String) -> Result<(), ParseError> {
        if self.stack.is_empty() {
            if self.seen_root || name != "project" {
                return Err(ParseError::UnexpectedRoot { found: name });
            }
            self.seen_root = true;
        }
        self.stack.push(name);
        self.text.clear();

        let path: Vec<&str> = self.stack.iter().map(String::as_str).collect();
        let relative = match path.as_slice() {
            ["project", "parent"] => {
                self.descriptor.parent = Some(ParentReference::default());
                return Ok(());
            }
            ["project", "profiles", "profile"] => {
                self.profile = Some(Profile::default());
                return Ok(());
            }
            ["project", "profiles", "profile", rest @ ..] => rest,
            ["project", rest @ ..] => rest,
            _ => return Ok(()),
        };

        match relative {
            ["dependencies", "dependency"]
            | ["dependencyManagement", "dependencies", "dependency"] => {
                self.dependency = Some(DependencyBuilder::default());
            }
            ["build", "plugins", "plugin"] => {
                self.plugin = Some(Plugin::new("", "", ""));
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self) {
        let text = std::mem::take(&mut self.text).trim().to_string();
        let stack = std::mem::take(&mut self.stack);
        {
            let path: Vec<&str> = stack.iter().map(String::as_str).collect();
            match path.as_slice() {
                ["project", "profiles", "profile"] => {
                    if let Some(profile) = self.profile.take() {
                        self.descriptor.profiles.push(profile);
                    }
                }
                ["project", "profiles", "profile", rest @ ..] => self.close_profile(rest, text),
                ["project", rest @ ..] => self.close_project(rest, text),
                _ => {}
            }
        }
        self.stack = stack;
        self.stack.pop();
    }

    fn close_project(&mut self, relative: &[&str], text: String) {
        match relative {
            ["groupId"] => self.descriptor.group_id = text,
            ["artifactId"] => self.descriptor.artifact_id = text,
            ["version"] => self.descriptor.version = text,
            ["modules", "module"] => self.descriptor.modules.push(text),
            ["parent", field] => {
                if let Some(parent) = self.descriptor.parent.as_mut() {
                    match *field {
                        "groupId" => parent.group_id = text,
                        "artifactId" => parent.artifact_id = text,
                        "version" => parent.version = text,
                        "relativePath" => parent.relative_path = text,
                        _ => {}
                    }
                }
            }
            _ => {
                let fragment = Fragment {
                    properties: &mut self.descriptor.properties,
                    dependencies: &mut self.descriptor.dependencies,
                    managed_dependencies: &mut self.descriptor.managed_dependencies,
                    plugins: &mut self.descriptor.plugins,
                };
                close_fragment(
                    fragment,
                    &mut self.dependency,
                    &mut self.plugin,
                    relative,
                    text,
                );
            }
        }
    }

    fn close_profile(&mut self, relative: &[&str], text: String) {
        let Some(profile) = self.profile.as_mut() else {
            return;
        };
        match relative {
            ["id"] => profile.id = text,
            ["activation", "activeByDefault"] => {
                profile.active_by_default = text.eq_ignore_ascii_case("true");
            }
            _ => {
                let fragment = Fragment {
                    properties: &mut profile.properties,
                    dependencies: &mut profile.dependencies,
                    managed_dependencies: &mut profile.managed_dependencies,
                    plugins: &mut profile.plugins,
                };
                close_fragment(
                    fragment,
                    &mut self.dependency,
                    &mut self.plugin,
                    relative,
                    text,
                );
            }
        }
    }

    fn finish(self, path: Option<PathBuf>) -> Result<Descriptor, ParseError> {
        if let Some(open) = self.stack.last() {
            return Err(ParseError::UnexpectedEof {
                element: open.clone(),
            });
        }
        if !self.seen_root {
            return Err(ParseError::Empty);
        }
        let mut descriptor = self.descriptor;
        descriptor.path = path;
        Ok(descriptor)
    }
}

fn close_fragment(
    fragment: Fragment<'_>,
    dependency: &mut Option<DependencyBuilder>,
    plugin: &mut Option<Plugin>,
    relative: &[&str],
    text: String,
) {
    match relative {
        ["properties", name] => fragment.properties.push(Property::new(*name, text)),
        ["dependencies", "dependency"] => {
            if let Some(builder) = dependency.take() {
                fragment.dependencies.push(builder.build());
            }
        }
        ["dependencyManagement", "dependencies", "dependency"] => {
            if let Some(builder) = dependency.take() {
                fragment.managed_dependencies.push(builder.build());
            }
        }
        ["dependencies", "dependency", field]
        | ["dependencyManagement", "dependencies", "dependency", field] => {
            if let Some(builder) = dependency.as_mut() {
                match *field {
                    "groupId" => builder.group_id = text,
                    "artifactId" => builder.artifact_id = text,
                    "version" => builder.version = text,
                    "scope" => builder.scope = text,
                    _ => {}
                }
            }
        }
        ["build", "plugins", "plugin"] => {
            if let Some(plugin) = plugin.take() {
                fragment.plugins.push(plugin);
            }
        }
        ["build", "plugins", "plugin", field] => {
            if let Some(plugin) = plugin.as_mut() {
                match *field {
                    "groupId" => plugin.group_id = text,
                    "artifactId" => plugin.artifact_id = text,
                    "version" => plugin.version = text,
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

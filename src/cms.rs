//! CMS admin config emission.
//!
//! When `[cms]` is enabled, the generate stage writes `admin/config.yml` —
//! the configuration consumed by git-backed content managers (Netlify CMS /
//! Decap and compatible). The emitted config maps every model
//! [`Collection`] to a CMS collection entry:
//!
//! - **Folder** collections become authorable folders (`create: true`) with
//!   the standard wiki page fields.
//! - **File** collections list each existing page as an editable file.
//! - **Resource** collections list synthesized stand-ins — pages a summary
//!   links to that nobody has written yet — so they show up as editing
//!   targets rather than silently missing.
//!
//! The `[cms.backend]` table passes through verbatim; summark does not
//! interpret backend settings.

use crate::config::WikiConfig;
use crate::model::Collection;
use crate::reference::join_path;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Serialize)]
struct AdminConfig {
    backend: serde_yaml::Value,
    media_folder: String,
    public_folder: String,
    collections: Vec<CmsCollection>,
}

#[derive(Debug, Serialize)]
struct CmsCollection {
    name: String,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    create: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<CmsField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<Vec<CmsFile>>,
}

#[derive(Debug, Serialize)]
struct CmsFile {
    label: String,
    name: String,
    file: String,
    fields: Vec<CmsField>,
}

#[derive(Debug, Serialize)]
struct CmsField {
    label: String,
    name: String,
    widget: String,
}

/// The fields every wiki page exposes to the editor.
fn page_fields() -> Vec<CmsField> {
    vec![
        CmsField {
            label: "Title".to_string(),
            name: "title".to_string(),
            widget: "string".to_string(),
        },
        CmsField {
            label: "Body".to_string(),
            name: "body".to_string(),
            widget: "markdown".to_string(),
        },
    ]
}

/// Collection name: `{variant}_{key}`, with the default section's empty key
/// spelled out.
fn collection_name(variant: &str, key: &str) -> String {
    let key = if key.is_empty() { "default" } else { key };
    format!("{variant}_{key}")
}

fn file_stem(path: &str) -> String {
    let name = path.rsplit_once('/').map(|(_, f)| f).unwrap_or(path);
    name.rsplit_once('.')
        .map(|(stem, _)| stem.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Render the admin config YAML for the given collections.
pub fn admin_config(
    config: &WikiConfig,
    collections: &[Collection],
) -> Result<String, CmsError> {
    let media_folder = join_path("", &config.cms.media_folder);
    let public_folder = format!(
        "{}/{}",
        config.site.base_url.trim_end_matches('/'),
        media_folder
    );

    let collections = collections
        .iter()
        .map(|collection| match collection {
            Collection::Folder {
                key,
                title,
                folder,
                can_create,
            } => CmsCollection {
                name: collection_name("folder", key),
                label: title.clone(),
                folder: Some(folder.clone()),
                create: Some(*can_create),
                fields: Some(page_fields()),
                files: None,
            },
            Collection::File { key, title, pages } => CmsCollection {
                name: collection_name("file", key),
                label: title.clone(),
                folder: None,
                create: None,
                fields: None,
                files: Some(
                    pages
                        .iter()
                        .filter_map(|page| {
                            page.source.as_ref().map(|source| CmsFile {
                                label: page.title.clone(),
                                name: file_stem(source),
                                file: source.clone(),
                                fields: page_fields(),
                            })
                        })
                        .collect(),
                ),
            },
            Collection::Resource {
                key,
                title,
                resources,
            } => CmsCollection {
                name: collection_name("resource", key),
                label: format!("{title} (missing pages)"),
                folder: None,
                create: None,
                fields: None,
                files: Some(
                    resources
                        .iter()
                        .map(|source| CmsFile {
                            label: source.clone(),
                            name: file_stem(source),
                            file: source.clone(),
                            fields: page_fields(),
                        })
                        .collect(),
                ),
            },
        })
        .collect();

    let admin = AdminConfig {
        backend: serde_yaml::to_value(&config.cms.backend)?,
        media_folder,
        public_folder,
        collections,
    };
    Ok(serde_yaml::to_string(&admin)?)
}

//! Default dataset written into a store that has never held data.

use chrono::{DateTime, Duration, Utc};

use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::{Dimensions, File, Folder, LocationTable, Snapshot};

/// Id of the seeded image folder.
pub const IMAGES_FOLDER: &str = "images";
/// Id of the seeded document folder.
pub const DOCUMENTS_FOLDER: &str = "documents";
/// Id of the seeded blog folder (inside `images`).
pub const BLOG_FOLDER: &str = "blog";

/// Build the default dataset, deriving file paths with `locations`.
pub fn default_snapshot(locations: &LocationTable) -> Snapshot {
    let epoch = DateTime::<Utc>::from_timestamp(1_704_067_200, 0).unwrap_or_default();

    let folder = |id: &str, name: &str, parent: Option<&str>, offset: i64| Folder {
        id: FolderId::from(id),
        name: name.to_string(),
        parent_id: parent.map(FolderId::from),
        created_at: epoch + Duration::minutes(offset),
        updated_at: epoch + Duration::minutes(offset),
        revision: 1,
    };

    let folders = vec![
        folder(IMAGES_FOLDER, "Imagens", None, 0),
        folder(DOCUMENTS_FOLDER, "Documentos", None, 1),
        folder(BLOG_FOLDER, "Blog", Some(IMAGES_FOLDER), 2),
    ];

    let file = |id: &str,
                name: &str,
                mime: &str,
                size: u64,
                folder: Option<&str>,
                dims: Option<(u32, u32)>,
                offset: i64| {
        let folder_id = folder.map(FolderId::from);
        File {
            id: FileId::from(id),
            name: name.to_string(),
            mime_type: mime.to_string(),
            size_bytes: size,
            path: locations.path_for(folder_id.as_ref(), name),
            folder_id,
            uploaded_at: epoch + Duration::minutes(offset),
            updated_at: epoch + Duration::minutes(offset),
            dimensions: dims.map(|(width, height)| Dimensions { width, height }),
            revision: 1,
        }
    };

    let files = vec![
        file(
            "seed-office-front",
            "escritorio-fachada.jpg",
            "image/jpeg",
            245_760,
            Some(IMAGES_FOLDER),
            Some((1920, 1080)),
            10,
        ),
        file(
            "seed-team",
            "equipe-contabil.png",
            "image/png",
            512_000,
            Some(IMAGES_FOLDER),
            Some((1200, 800)),
            11,
        ),
        file(
            "seed-blog-tax",
            "imposto-de-renda.jpg",
            "image/jpeg",
            180_224,
            Some(BLOG_FOLDER),
            Some((1280, 720)),
            12,
        ),
        file(
            "seed-fee-table",
            "tabela-de-honorarios.pdf",
            "application/pdf",
            98_304,
            Some(DOCUMENTS_FOLDER),
            None,
            13,
        ),
        file(
            "seed-checklist",
            "checklist-abertura-empresa.pdf",
            "application/pdf",
            65_536,
            Some(DOCUMENTS_FOLDER),
            None,
            14,
        ),
        file(
            "seed-logo",
            "logo.svg",
            "image/svg+xml",
            4_096,
            None,
            None,
            15,
        ),
    ];

    Snapshot { folders, files }
}

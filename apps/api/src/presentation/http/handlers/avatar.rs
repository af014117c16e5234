use crate::{
    application::upload_avatar::dto::{UploadAvatarRequest, UploadAvatarResponse},
    domain::media::entity::AvatarFile,
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{
        Multipart, Path, State,
        multipart::{Field, MultipartError},
    },
    http::StatusCode,
};
use bytes::{Bytes, BytesMut};

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

pub async fn upload_avatar(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadAvatarResponse>, AppError> {
    let max_bytes = state.config.avatar_max_bytes;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Field error".into()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let (data, truncated) = read_capped(field, max_bytes).await?;

        let avatar = AvatarFile::new(name, content_type, data);
        if truncated {
            // The rest of the body is never read.
            file = Some(avatar.mark_truncated());
            break;
        }
        file = Some(avatar);
    }

    let file = file.ok_or(AppError::BadRequest("Missing file".into()))?;
    let url = state
        .upload_avatar
        .execute(UploadAvatarRequest { user_id, file })
        .await?;

    Ok(Json(UploadAvatarResponse { url }))
}

/// Reads a field until it ends or grows past `max_bytes`.
///
/// Returns the bytes read and whether reading stopped early. Hitting the
/// router's body limit counts as stopping early.
async fn read_capped(mut field: Field<'_>, max_bytes: usize) -> Result<(Bytes, bool), AppError> {
    let mut buf = BytesMut::new();
    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                buf.extend_from_slice(&chunk);
                if buf.len() > max_bytes {
                    buf.truncate(max_bytes + 1);
                    return Ok((buf.freeze(), true));
                }
            }
            Ok(None) => return Ok((buf.freeze(), false)),
            Err(e) if is_body_limit(&e) => return Ok((buf.freeze(), true)),
            Err(_) => return Err(AppError::BadRequest("Byte error".into())),
        }
    }
}

fn is_body_limit(err: &MultipartError) -> bool {
    err.status() == StatusCode::PAYLOAD_TOO_LARGE
}

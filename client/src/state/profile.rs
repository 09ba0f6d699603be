//! Profile editor helpers: bio limits, avatar URLs, and the multipart form.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::transport::{FilePart, FormPart, Transport};
use crate::net::types::{ProfileResponse, User};

/// Maximum bio length in characters.
pub const BIO_LIMIT: usize = 200;

/// Accepted avatar MIME types, as passed to the file input's `accept`.
pub const AVATAR_ACCEPT: &str = "image/jpg, image/jpeg, image/png";

const INITIALS_SERVICE: &str = "https://ui-avatars.com/api/";

pub fn remaining_bio_chars(bio: &str) -> usize {
    BIO_LIMIT.saturating_sub(bio.chars().count())
}

/// Truncate to `BIO_LIMIT` characters (not bytes).
pub fn clamp_bio(bio: &str) -> String {
    bio.chars().take(BIO_LIMIT).collect()
}

/// Image URL for the profile header.
///
/// Users with uploaded avatar data get the backend's avatar endpoint with a
/// `t=` query so a fresh upload is never served from cache. Everyone else gets
/// a generated initials image.
pub fn avatar_source(config: &ClientConfig, user: &User, cache_bust: u64) -> String {
    if user.has_avatar() {
        let id = urlencoding::encode(&user.id);
        return format!("{}/user/avatar/{id}?t={cache_bust}", config.backend_url);
    }
    let name = if user.username.is_empty() { "User" } else { user.username.as_str() };
    format!(
        "{INITIALS_SERVICE}?name={}&background=0D8ABC&color=fff&size=128",
        urlencoding::encode(name)
    )
}

/// An avatar file picked in the browser, already read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Fields for `POST /user`: `_id`, `bio`, and `avatar` when one was picked.
pub fn build_profile_form(user_id: &str, bio: &str, avatar: Option<AvatarUpload>) -> Vec<FormPart> {
    let mut form = vec![
        FormPart::Text { name: "_id".to_owned(), value: user_id.to_owned() },
        FormPart::Text { name: "bio".to_owned(), value: clamp_bio(bio) },
    ];
    if let Some(upload) = avatar {
        form.push(FormPart::File {
            name: "avatar".to_owned(),
            file: FilePart { file_name: upload.file_name, content_type: upload.content_type, bytes: upload.bytes },
        });
    }
    form
}

/// Send the profile form and, on success, replace the stored user with the
/// server's record. A failed update leaves storage untouched.
pub async fn update_profile<T: Transport>(
    api: &ApiClient<T>,
    user_id: &str,
    bio: &str,
    avatar: Option<AvatarUpload>,
) -> Result<ProfileResponse, ApiError> {
    let resp = api.update_profile(build_profile_form(user_id, bio, avatar)).await?;
    if let Some(user) = &resp.user {
        api.session().set_user(user);
    }
    Ok(resp)
}

/// Read the first file of an `<input type="file">` into an [`AvatarUpload`].
#[cfg(feature = "hydrate")]
pub async fn read_avatar_input(input: &web_sys::HtmlInputElement) -> Option<AvatarUpload> {
    let file = input.files()?.get(0)?;
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await.ok()?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Some(AvatarUpload { file_name: file.name(), content_type: file.type_(), bytes })
}

/// Builds a public object URL from a configured base.
///
/// The base may be a template containing `{bucket}` and/or `{key}`
/// (e.g. `https://{bucket}.cdn.example.com/{key}`); otherwise
/// `<base>/<bucket>/<key>` is produced.
pub fn build_public_url(base: &str, bucket: &str, key: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    let key = key.trim_start_matches('/');

    if trimmed.contains("{bucket}") || trimmed.contains("{key}") {
        return trimmed.replace("{bucket}", bucket).replace("{key}", key);
    }

    format!("{}/{}/{}", trimmed, bucket, key)
}

/// Maps a logical target name to its Web API collection path.
///
/// The remote exposes entity sets under plural collection names. Unmapped
/// targets resolve to `None` and are rejected at validation time rather than
/// producing a request against an unresolved URL.
pub fn collection_for_target(target: &str) -> Option<&'static str> {
    match target {
        "account" => Some("accounts"),
        _ => None,
    }
}

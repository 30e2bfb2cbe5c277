/// Strips markup that could execute when the value is rendered as HTML.
pub fn sanitize(text: &str) -> String {
    ammonia::clean(text)
}

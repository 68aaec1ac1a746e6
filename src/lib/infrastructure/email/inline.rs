//! CSS inlining for HTML email bodies

use css_inline::{CSSInliner, InlineError};

/// Moves the document's `<style>` rules into `style` attributes on the elements they match.
///
/// Remote stylesheets are never fetched.
pub fn inline_css(html: &str) -> Result<String, InlineError> {
    CSSInliner::options()
        .load_remote_stylesheets(false)
        .build()
        .inline(html)
}

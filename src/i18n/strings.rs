use crate::i18n::Locale;

/// All localized user-facing strings for a locale.
///
/// Strings may contain rich-text tags (`<strong>`, `<em>`); render them with
/// `i18n::tags::render_html`. Placeholders use `{name}` syntax.
#[derive(Debug, Clone)]
pub struct LocaleStrings {
    // ==================== Navigation ====================
    pub nav_home: &'static str,
    pub nav_about: &'static str,
    pub nav_blog: &'static str,
    pub nav_projects: &'static str,
    pub nav_experience: &'static str,
    pub nav_cv: &'static str,

    /// Accessible label of the language switcher
    pub switch_label: &'static str,

    // ==================== Pages ====================
    /// Tagline on the home page
    /// Placeholders: {author}
    pub home_intro: &'static str,

    /// Shown on listing pages without content
    pub empty_listing: &'static str,

    /// "Read more" link on listing entries
    pub read_more: &'static str,

    /// Label before the last-updated date of a document
    pub updated_on: &'static str,

    // ==================== Errors ====================
    pub not_found_title: &'static str,

    /// May contain tags
    pub not_found_body: &'static str,

    /// Link back to the home page from the not-found page
    pub back_home: &'static str,

    /// Placeholders: {seconds}
    pub too_many_requests: &'static str,

    // ==================== Contact ====================
    pub contact_received: &'static str,
    pub contact_invalid: &'static str,
}

impl LocaleStrings {
    pub fn for_locale(locale: Locale) -> &'static LocaleStrings {
        match locale.code() {
            "en" => &ENGLISH_STRINGS,
            _ => &DUTCH_STRINGS,
        }
    }
}

// ==================== Dutch Strings ====================

/// Dutch strings (default locale)
pub const DUTCH_STRINGS: LocaleStrings = LocaleStrings {
    nav_home: "Home",
    nav_about: "Over mij",
    nav_blog: "Blog",
    nav_projects: "Projecten",
    nav_experience: "Ervaring",
    nav_cv: "CV",
    switch_label: "Taal",

    home_intro: "Welkom! Ik ben <strong>{author}</strong>.",
    empty_listing: "Hier staat nog niets.",
    read_more: "Lees verder",
    updated_on: "Bijgewerkt op",

    not_found_title: "Pagina niet gevonden",
    not_found_body: "Deze pagina <strong>bestaat niet</strong> of is verplaatst.",
    back_home: "Terug naar home",
    too_many_requests: "Te veel verzoeken. Probeer het over {seconds} seconden opnieuw.",

    contact_received: "Bedankt! Je bericht is ontvangen.",
    contact_invalid: "Vul je naam, een geldig e-mailadres en een bericht in.",
};

// ==================== English Strings ====================

/// English strings
pub const ENGLISH_STRINGS: LocaleStrings = LocaleStrings {
    nav_home: "Home",
    nav_about: "About",
    nav_blog: "Blog",
    nav_projects: "Projects",
    nav_experience: "Experience",
    nav_cv: "Resume",
    switch_label: "Language",

    home_intro: "Welcome! I'm <strong>{author}</strong>.",
    empty_listing: "Nothing here yet.",
    read_more: "Read more",
    updated_on: "Updated on",

    not_found_title: "Page not found",
    not_found_body: "This page <strong>does not exist</strong> or has moved.",
    back_home: "Back to home",
    too_many_requests: "Too many requests. Try again in {seconds} seconds.",

    contact_received: "Thanks! Your message has been received.",
    contact_invalid: "Please provide your name, a valid email address and a message.",
};

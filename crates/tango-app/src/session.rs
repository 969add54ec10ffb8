use tango_config::Config;
use tango_core::{LanguageProfile, Session};
use tango_lang_chinese::ChineseProfile;
use tango_lang_english::EnglishProfile;
use tango_lexicon::LexiconLoader;

/// Every language profile the app ships
pub fn language_profiles() -> Vec<Box<dyn LanguageProfile>> {
    vec![Box::new(EnglishProfile::new()), Box::new(ChineseProfile::new())]
}

/// Load lexical data and start a session on the configured language
pub fn build_session(config: &Config) -> anyhow::Result<Session> {
    let resources = LexiconLoader::load(config);
    let session = Session::new(resources, language_profiles(), &config.session.language)?;
    tracing::info!(
        "Session ready: {} (available: {})",
        session.profile().name(),
        session.profile_ids().join(", ")
    );
    Ok(session)
}

const ROOT_PREFIX: &str = "TRIANGULATE";

pub(crate) mod svg {
    use std::{env, path};

    use crate::debug;

    const GROUP_PREFIX: &str = "SVG";

    fn key(name: &str) -> String {
        format!("{}_{}_{}", super::ROOT_PREFIX, GROUP_PREFIX, name)
    }

    pub(crate) fn output_path() -> Option<path::PathBuf> {
        env::var_os(key("OUTPUT_PATH")).map(path::PathBuf::from)
    }

    pub(crate) fn show_labels() -> bool {
        // Note the show/hide inversion
        env::var_os(key("HIDE_LABELS")).is_none()
    }

    pub(crate) fn output_level() -> debug::svg::SvgOutputLevel {
        use debug::svg::SvgOutputLevel;

        match env::var(key("OUTPUT_LEVEL")) {
            Ok(value) => match value.trim() {
                "3" => SvgOutputLevel::AllSteps,
                "2" => SvgOutputLevel::MajorSteps,
                "1" => SvgOutputLevel::ResultOnly,
                _ => SvgOutputLevel::None,
            },
            // An output path alone asks for the final picture
            Err(_) => SvgOutputLevel::ResultOnly,
        }
    }
}

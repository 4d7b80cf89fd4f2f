//! Portfolio projects shown as cards on the home page

use serde::Serialize;

macro_rules! github_profile_url {
    () => {
        "https://github.com/abdullahzeidan"
    };
}

/// Public GitHub profile the repository links point into
pub const GITHUB_PROFILE_URL: &str = github_profile_url!();

/// Image shown on a project card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectImage {
    pub src: &'static str,
    pub alt: &'static str,
}

/// One portfolio entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectCard {
    /// Card title, also the card's identity key
    pub title: &'static str,
    pub link: &'static str,
    pub content: &'static str,
    /// Free-text technology list
    pub stack: &'static str,
    pub image: ProjectImage,
    /// Extra classes applied to the image wrapper
    pub extra_classes: Option<&'static str>,
}

impl ProjectCard {
    /// Key identifying the card in rendered markup
    pub fn key(&self) -> &'static str {
        self.title
    }
}

const ASTRO_LOGO: ProjectImage = ProjectImage {
    src: "/images/astro-logo.png",
    alt: "Astro logo",
};
const BOOTSTRAP_LOGO: ProjectImage = ProjectImage {
    src: "/images/bootstrap-logo.png",
    alt: "Bootstrap logo",
};
const JS_LOGO: ProjectImage = ProjectImage {
    src: "/images/js-logo.png",
    alt: "Javascript logo",
};
const REACT_LOGO: ProjectImage = ProjectImage {
    src: "/images/react-logo.png",
    alt: "React logo",
};
const VUE_LOGO: ProjectImage = ProjectImage {
    src: "/images/vue-logo.png",
    alt: "Vue logo",
};

/// Projects in display order
pub const PROJECT_LIST: &[ProjectCard] = &[
    ProjectCard {
        title: "IMT",
        link: "http://imt-med.com",
        content: "A landing page for a medical company client, powered by Astro.",
        stack: "React, TypeScript, Tailwind, Astro.js",
        image: ASTRO_LOGO,
        extra_classes: Some("bg-stone-800"),
    },
    ProjectCard {
        title: "RGB Guessing Game",
        link: "https://rgbguess-game.netlify.app",
        content: "A lightweight educational guessing game which teaches people how to determine colors from their RGB values",
        stack: "HTML/CSS, JavaScript",
        image: JS_LOGO,
        extra_classes: Some("p-1 bg-[#f7e018]"),
    },
    ProjectCard {
        title: "Car Rental Website",
        link: "https://mock-carrentals.netlify.app",
        content: "A simple Bootstrap car rental website's frontend",
        stack: "HTML/CSS, Bootstrap, jQuery",
        image: BOOTSTRAP_LOGO,
        extra_classes: Some("bg-purple-200 dark:bg-purple-300"),
    },
    ProjectCard {
        title: "Simple Weather App",
        link: "https://abdullahzeidan-vue-weather.netlify.app",
        content: "A super simple and basic weather application, used to quickly show weather data of any city. Built for trying out Vue.js",
        stack: "Vue 2, Sass, REST API",
        image: VUE_LOGO,
        extra_classes: Some("p-2 bg-slate-200"),
    },
    ProjectCard {
        title: "react-scaffold",
        link: concat!(github_profile_url!(), "/react-scaffold"),
        content: "Scaffold your React app from the command line. Built with TypeScript",
        stack: "Node.js, TypeScript, oclif, Mocha TDD",
        image: REACT_LOGO,
        extra_classes: Some("py-2 px-1 bg-slate-800"),
    },
    ProjectCard {
        title: "MIPS.js",
        link: concat!(github_profile_url!(), "/mips.js"),
        content: "A terminal-based MIPS emulator written in vanilla JavaScript; a simple CLI app that can be used for educational purposes",
        stack: "Node.js, JavaScript",
        image: JS_LOGO,
        extra_classes: Some("p-1 bg-[#f7e018]"),
    },
];

/// The compiled-in project list
pub fn projects() -> &'static [ProjectCard] {
    PROJECT_LIST
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_titles_are_unique() {
        let mut seen = HashSet::new();
        for project in projects() {
            assert!(seen.insert(project.key()), "duplicate project title {:?}", project.title);
        }
    }

    #[test]
    fn test_display_order() {
        let titles: Vec<_> = projects().iter().map(|p| p.title).collect();
        assert_eq!(
            titles,
            vec![
                "IMT",
                "RGB Guessing Game",
                "Car Rental Website",
                "Simple Weather App",
                "react-scaffold",
                "MIPS.js"
            ]
        );
    }

    #[test]
    fn test_github_links() {
        let scaffold = projects().iter().find(|p| p.title == "react-scaffold").unwrap();
        assert_eq!(scaffold.link, format!("{}/react-scaffold", GITHUB_PROFILE_URL));
    }

    #[test]
    fn test_required_fields_present() {
        for project in projects() {
            assert!(!project.link.is_empty());
            assert!(!project.content.is_empty());
            assert!(!project.stack.is_empty());
            assert!(project.image.src.starts_with("/images/"));
            assert!(!project.image.alt.is_empty());
        }
    }
}

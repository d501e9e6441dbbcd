//! Social and developer platforms checked by the username search.

/// A platform where a username may hold a public profile page.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    pub name: &'static str,
    /// URL template; `{}` is replaced with the username.
    pub url_template: &'static str,
}

impl Platform {
    /// Build the profile URL for a username.
    pub fn profile_url(&self, username: &str) -> String {
        self.url_template.replace("{}", username)
    }
}

/// Platforms that answer 200 for existing profiles and 404 (or a redirect)
/// for missing ones.
pub const PLATFORMS: &[Platform] = &[
    Platform { name: "GitHub", url_template: "https://github.com/{}" },
    Platform { name: "Twitter/X", url_template: "https://x.com/{}" },
    Platform { name: "Instagram", url_template: "https://www.instagram.com/{}/" },
    Platform { name: "Reddit", url_template: "https://www.reddit.com/user/{}/" },
    Platform { name: "TikTok", url_template: "https://www.tiktok.com/@{}" },
    Platform { name: "YouTube", url_template: "https://www.youtube.com/@{}" },
    Platform { name: "Pinterest", url_template: "https://www.pinterest.com/{}/" },
    Platform { name: "Twitch", url_template: "https://www.twitch.tv/{}" },
    Platform { name: "Steam", url_template: "https://steamcommunity.com/id/{}" },
    Platform { name: "Medium", url_template: "https://medium.com/@{}" },
    Platform { name: "GitLab", url_template: "https://gitlab.com/{}" },
    Platform { name: "Bitbucket", url_template: "https://bitbucket.org/{}/" },
    Platform { name: "Dev.to", url_template: "https://dev.to/{}" },
    Platform { name: "HackerOne", url_template: "https://hackerone.com/{}" },
    Platform { name: "Keybase", url_template: "https://keybase.io/{}" },
    Platform { name: "Gravatar", url_template: "https://en.gravatar.com/{}" },
    Platform { name: "Patreon", url_template: "https://www.patreon.com/{}" },
    Platform { name: "Spotify", url_template: "https://open.spotify.com/user/{}" },
    Platform { name: "SoundCloud", url_template: "https://soundcloud.com/{}" },
    Platform { name: "Flickr", url_template: "https://www.flickr.com/people/{}/" },
    Platform { name: "Telegram", url_template: "https://t.me/{}" },
    Platform { name: "Docker Hub", url_template: "https://hub.docker.com/u/{}" },
    Platform { name: "npm", url_template: "https://www.npmjs.com/~{}" },
    Platform { name: "PyPI", url_template: "https://pypi.org/user/{}/" },
    Platform { name: "Replit", url_template: "https://replit.com/@{}" },
];

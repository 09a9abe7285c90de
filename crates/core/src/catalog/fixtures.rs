//! Demo catalog loaded into empty stores.

use chrono::{Days, NaiveDate};

use super::types::{NewCategory, NewEditor, NewVideoGame, Role};

const EDITORS: &[(&str, &str)] = &[
    ("Nintendo", "Japan"),
    ("Sony", "Japan"),
    ("Microsoft", "USA"),
    ("Ubisoft", "France"),
    ("Electronic Arts", "USA"),
    ("Activision", "USA"),
    ("Square Enix", "Japan"),
    ("Sega", "Japan"),
    ("Capcom", "Japan"),
    ("Bandai Namco", "Japan"),
    ("Konami", "Japan"),
    ("Take-Two Interactive", "USA"),
    ("Bethesda Softworks", "USA"),
    ("Valve", "USA"),
    ("CD Projekt", "Poland"),
    ("Epic Games", "USA"),
    ("Blizzard Entertainment", "USA"),
    ("Rockstar Games", "USA"),
    ("Tencent", "China"),
    ("NetEase", "China"),
];

const CATEGORIES: &[&str] = &[
    "Action",
    "Adventure",
    "Role-Playing",
    "Simulation",
    "Strategy",
    "Sports",
    "Puzzle",
    "Idle",
    "Racing",
    "Fighting",
    "Survival",
    "Horror",
    "MMORPG",
    "Educational",
    "Music",
    "Party",
    "Board",
    "Card",
    "Casual",
    "Arcade",
    "Platformer",
    "Shooter",
];

/// When a seeded game is released.
#[derive(Debug, Clone, Copy)]
enum Release {
    On(i32, u32, u32),
    /// Days after the seeding date, so a fresh demo always has upcoming games.
    InDays(u64),
}

struct SeedGame {
    title: &'static str,
    description: &'static str,
    release: Release,
    editor: usize,
    categories: &'static [usize],
    cover_image: Option<&'static str>,
}

const GAMES: &[SeedGame] = &[
    SeedGame {
        title: "The Legend of Zelda: Breath of the Wild",
        description: "An action-adventure game developed and published by Nintendo.",
        release: Release::On(2017, 3, 3),
        editor: 0,
        categories: &[0, 1],
        cover_image: Some("thelegendofzeldabreathofthewild.jpg"),
    },
    SeedGame {
        title: "The Witcher 3: Wild Hunt",
        description: "An action role-playing game developed and published by CD Projekt.",
        release: Release::On(2015, 5, 19),
        editor: 14,
        categories: &[0, 2],
        cover_image: None,
    },
    SeedGame {
        title: "FIFA 21",
        description: "A football simulation game developed and published by Electronic Arts.",
        release: Release::On(2020, 10, 9),
        editor: 4,
        categories: &[3, 5],
        cover_image: None,
    },
    SeedGame {
        title: "Super Mario Odyssey",
        description: "A platform game developed and published by Nintendo.",
        release: Release::On(2017, 10, 27),
        editor: 0,
        categories: &[20],
        cover_image: None,
    },
    SeedGame {
        title: "Grand Theft Auto V",
        description: "An action-adventure game developed by Rockstar North and published by Rockstar Games.",
        release: Release::On(2013, 9, 17),
        editor: 17,
        categories: &[0, 1],
        cover_image: None,
    },
    SeedGame {
        title: "Red Dead Redemption 2",
        description: "An action-adventure game developed and published by Rockstar Games.",
        release: Release::On(2018, 10, 26),
        editor: 17,
        categories: &[0, 1],
        cover_image: None,
    },
    SeedGame {
        title: "Cyberpunk 2077",
        description: "An action role-playing game developed and published by CD Projekt.",
        release: Release::On(2020, 12, 10),
        editor: 14,
        categories: &[0, 2],
        cover_image: Some("cyberpunk2077.jpg"),
    },
    SeedGame {
        title: "Assassin's Creed Valhalla",
        description: "An action role-playing game developed and published by Ubisoft.",
        release: Release::On(2020, 11, 10),
        editor: 3,
        categories: &[0, 2],
        cover_image: Some("assassinscreedvalhalla.jpg"),
    },
    SeedGame {
        title: "Call of Duty: Warzone",
        description: "A battle royale game developed by Infinity Ward and Raven Software and published by Activision.",
        release: Release::On(2020, 3, 10),
        editor: 5,
        categories: &[21],
        cover_image: None,
    },
    SeedGame {
        title: "World of Warcraft",
        description: "A massively multiplayer online role-playing game developed and published by Blizzard Entertainment.",
        release: Release::On(2004, 11, 23),
        editor: 16,
        categories: &[12],
        cover_image: None,
    },
    SeedGame {
        title: "Overwatch",
        description: "A first-person shooter game developed and published by Blizzard Entertainment.",
        release: Release::On(2016, 5, 24),
        editor: 16,
        categories: &[21],
        cover_image: None,
    },
    SeedGame {
        title: "Diablo III",
        description: "An action role-playing game developed and published by Blizzard Entertainment.",
        release: Release::On(2012, 5, 15),
        editor: 16,
        categories: &[0, 2],
        cover_image: None,
    },
    SeedGame {
        title: "The Elder Scrolls V: Skyrim",
        description: "An action role-playing game developed and published by Bethesda Softworks.",
        release: Release::On(2011, 11, 11),
        editor: 12,
        categories: &[0, 2],
        cover_image: None,
    },
    SeedGame {
        title: "DOOM Eternal",
        description: "A first-person shooter game developed by id Software and published by Bethesda Softworks.",
        release: Release::On(2020, 3, 20),
        editor: 12,
        categories: &[21],
        cover_image: None,
    },
    SeedGame {
        title: "Halo: The Master Chief Collection",
        description: "A compilation of first-person shooter games developed by 343 Industries and published by Xbox Game Studios.",
        release: Release::On(2014, 11, 11),
        editor: 2,
        categories: &[21],
        cover_image: None,
    },
    SeedGame {
        title: "Mario Kart World Tour",
        description: "A kart racing game with new tracks every season.",
        release: Release::InDays(2),
        editor: 0,
        categories: &[8, 15],
        cover_image: None,
    },
    SeedGame {
        title: "Street Fighter Legends",
        description: "A competitive fighting game featuring the whole classic roster.",
        release: Release::InDays(5),
        editor: 8,
        categories: &[9, 19],
        cover_image: None,
    },
    SeedGame {
        title: "Sonic Frontiers II",
        description: "An open-zone platformer developed and published by Sega.",
        release: Release::InDays(30),
        editor: 7,
        categories: &[20, 1],
        cover_image: None,
    },
];

/// A demo account. Passwords are hashed by the caller before storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoUser {
    pub email: &'static str,
    pub password: &'static str,
    pub roles: &'static [Role],
    pub newsletter: bool,
}

pub fn seed_editors() -> Vec<NewEditor> {
    EDITORS
        .iter()
        .map(|(name, country)| NewEditor::new(*name, *country))
        .collect()
}

pub fn seed_categories() -> Vec<NewCategory> {
    CATEGORIES.iter().map(|name| NewCategory::new(*name)).collect()
}

/// Builds the demo games. `editor_ids` and `category_ids` are the ids the store
/// assigned to [`seed_editors`] and [`seed_categories`], in the same order.
pub fn seed_video_games(
    today: NaiveDate,
    editor_ids: &[i64],
    category_ids: &[i64],
) -> Vec<NewVideoGame> {
    GAMES
        .iter()
        .filter_map(|seed| {
            let release_date = match seed.release {
                Release::On(y, m, d) => NaiveDate::from_ymd_opt(y, m, d)?,
                Release::InDays(days) => today.checked_add_days(Days::new(days))?,
            };
            let mut game = NewVideoGame::new(seed.title, release_date, seed.description)
                .with_categories(
                    seed.categories
                        .iter()
                        .filter_map(|index| category_ids.get(*index).copied()),
                );
            if let Some(editor_id) = editor_ids.get(seed.editor) {
                game = game.with_editor(*editor_id);
            }
            if let Some(cover) = seed.cover_image {
                game = game.with_cover_image(cover);
            }
            Some(game)
        })
        .collect()
}

pub fn seed_users() -> Vec<DemoUser> {
    vec![
        DemoUser {
            email: "admin@example.com",
            password: "admin",
            roles: &[Role::Admin, Role::User],
            newsletter: true,
        },
        DemoUser {
            email: "user@example.com",
            password: "user",
            roles: &[Role::User],
            newsletter: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{validate_video_game, video_game_violations};

    #[test]
    fn test_seed_sizes() {
        assert_eq!(seed_editors().len(), EDITORS.len());
        assert_eq!(seed_categories().len(), 22);
        assert_eq!(seed_users().len(), 2);
    }

    #[test]
    fn test_seed_games_are_valid() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let editor_ids: Vec<i64> = (1..=EDITORS.len() as i64).collect();
        let category_ids: Vec<i64> = (1..=CATEGORIES.len() as i64).collect();

        let games = seed_video_games(today, &editor_ids, &category_ids);

        assert_eq!(games.len(), GAMES.len());
        for (index, game) in games.into_iter().enumerate() {
            let violations =
                video_game_violations(&game.title, &game.description, Some(game.release_date));
            assert!(violations.is_empty(), "{}: {violations:?}", game.title);
            assert!(validate_video_game(&game.into_video_game(index as i64)).is_ok());
        }
    }

    #[test]
    fn test_relative_releases_follow_today() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let games = seed_video_games(today, &[1], &[1]);

        let upcoming: Vec<_> = games
            .iter()
            .filter(|game| game.release_date >= today)
            .map(|game| game.release_date)
            .collect();

        assert_eq!(upcoming.len(), 3);
        assert!(upcoming.contains(&NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()));
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let games = seed_video_games(today, &[], &[]);
        assert!(games.iter().all(|game| game.editor_id.is_none()));
        assert!(games.iter().all(|game| game.category_ids.is_empty()));
    }
}

pub const ANIME_GROUPS: [&str; 4] = [
	"alt.binaries.anime",
	"alt.binaries.multimedia.anime",
	"alt.binaries.multimedia.anime.repost",
	"alt.binaries.multimedia.anime.highspeed",
];

/// Category for groups outside every known table. Every indexed group is currently anime.
const DEFAULT_CATEGORY: Category = Category::Anime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
	Anime,
}
impl Category {
	/// Parses the `cat` search filter. Unknown values mean "all categories".
	pub fn from_filter(raw: &str) -> Option<Self> {
		match raw {
			"anime" => Some(Self::Anime),
			_ => None,
		}
	}

	pub fn slug(&self) -> &'static str {
		match self {
			Self::Anime => "anime",
		}
	}

	pub fn title(&self) -> &'static str {
		match self {
			Self::Anime => "Anime",
		}
	}
}

pub fn categorize(group: &str) -> Category {
	if ANIME_GROUPS.contains(&group) {
		return Category::Anime;
	}

	DEFAULT_CATEGORY
}

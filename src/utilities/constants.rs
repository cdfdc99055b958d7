pub const GATHERER_URL: &str = "http://gatherer.wizards.com";

pub const FRONT_PAGE_PATH: &str = "/Pages/Default.aspx";
pub const SEARCH_PATH: &str = "/Pages/Search/Default.aspx";
pub const CARD_DETAILS_PATH: &str = "/Pages/Card/Details.aspx";
pub const CARD_LANGUAGES_PATH: &str = "/Pages/Card/Languages.aspx";

pub const PATCH_DIR: &str = "patches-v2";
pub const PATCH_FILE_SUFFIX: &str = ".json";
pub const MANIFEST_FILE_NAME: &str = "patches.json";
pub const EXPANSIONS_FILE: &str = "expansions.json";

pub const PATCH_URL: &str = "https://raw.githubusercontent.com/AEFeinstein/GathererScraper/master/patches-v2/";

pub const RETRY_BASE_DELAY_MS: u64 = 1000;

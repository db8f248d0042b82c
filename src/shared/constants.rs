/// Route the dashboard sends operators to whenever the admin gate fails closed
pub const LOGIN_ROUTE: &str = "/login";

// =============================================================================
// LIST LIMITS
// =============================================================================

/// Default size of the "recent users" widget on the dashboard home
pub const DEFAULT_RECENT_USERS_LIMIT: i64 = 5;

/// Default size of the client/provider directory listings
pub const DEFAULT_DIRECTORY_LIMIT: i64 = 20;

/// Maximum rows any list endpoint returns
pub const MAX_LIST_LIMIT: i64 = 100;

/// Days covered by the registration history when no range is given
pub const DEFAULT_HISTORY_DAYS: i64 = 30;

// =============================================================================
// PROFILE PLACEHOLDERS
// =============================================================================

pub const PLACEHOLDER_AVATAR_URL: &str = "https://via.placeholder.com/150";
pub const PLACEHOLDER_FULL_NAME: &str = "Nome não informado";
pub const PLACEHOLDER_USERNAME: &str = "sem_user";
pub const PLACEHOLDER_EMAIL: &str = "Email restrito";
pub const PLACEHOLDER_TAX_ID: &str = "Não informado";
pub const PLACEHOLDER_LOCATION: &str = "Localização não informada";

// =============================================================================
// MAP
// =============================================================================

/// Radius of the coverage circle drawn around every provider
pub const COVERAGE_RADIUS_METERS: u32 = 20_000;

/// Continental overview used when no provider has a position
pub const DEFAULT_MAP_CENTER: (f64, f64) = (-14.235, -51.9253);
pub const DEFAULT_MAP_ZOOM: u8 = 4;
pub const PROVIDER_MAP_ZOOM: u8 = 10;

pub const MAP_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const MAP_TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

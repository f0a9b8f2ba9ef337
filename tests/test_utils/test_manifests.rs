#[allow( dead_code )]
mod test_manifests {

	use std::path::{ Path, PathBuf };

	pub const WEATHER: &str = r#"
		[module]
		name = "weather"

		[[plugin]]
		provider = "weather::HealthProvider"

		[[plugin]]
		category = "Service"
		sub_category = "SampleWeather"
		provider = "weather::ForecastProvider"
	"#;

	pub const STORAGE: &str = r#"
		[[plugin]]
		category = "Database"
		sub_category = "Postgres"
		provider = "storage::PostgresProvider"
	"#;

	pub const HALF_CATEGORY: &str = r#"
		[[plugin]]
		provider = "broken::GoodProvider"

		[[plugin]]
		category = "Service"
		provider = "broken::HalfProvider"
	"#;

	pub const NOT_TOML: &str = "this is [ not a manifest" ;

	/// Writes `text` to `relative` below `base`, creating directories on the way.
	pub fn write( base: &Path, relative: &str, text: &str ) -> PathBuf {
		let path = base.join( relative );
		if let Some( parent ) = path.parent() {
			std::fs::create_dir_all( parent ).expect( "create fixture directory" );
		}
		std::fs::write( &path, text ).expect( "write fixture" );
		path
	}

}

//! Resolves the named instances configured for a categorized plugin.
//!
//! Instances live under `Plugins:<category>:<sub_category>` and may be written in
//! either of two encodings:
//!
//! ```json
//! { "Plugins": { "Database": { "Postgres": [ "Primary", "Replica" ] } } }
//! ```
//!
//! ```json
//! { "Plugins": { "Database": { "Postgres": { "Primary": { "Pool": "8" }, "Replica": {} } } } }
//! ```
//!
//! In the array form the element values are the names; in the keyed form the keys
//! are. A child holding a non-empty value is always read as the array form.

use itertools::Itertools ;
use tracing::debug ;

use crate::ConfigSection ;
use crate::config::{ is_numeric_key, join_path };



/// Name of the section holding plugin instance configuration.
pub const PLUGINS_SECTION: &str = "Plugins" ;

/// One instance of a plugin to attach, with the configuration scoped to it.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct ResolvedInstance {
	pub name: Option<String>,
	pub config_scope: ConfigSection,
}

impl ResolvedInstance {

	/// The single, unnamed instance of an uncategorized plugin.
	pub fn unnamed( root: &ConfigSection ) -> Self {
		Self { name: None, config_scope: ConfigSection::empty( join_path( root.path(), PLUGINS_SECTION )) }
	}

	#[inline] pub fn name( &self ) -> Option<&str> { self.name.as_deref() }

}

/// Instances configured under `root:Plugins:<category>:<sub_category>`, in
/// configuration order. Missing sections resolve to no instances.
pub fn resolve( category: &str, sub_category: &str, root: &ConfigSection ) -> Vec<ResolvedInstance> {

	let Some( category_section ) = root.child( PLUGINS_SECTION ).and_then(| plugins | plugins.child( category )) else {
		return Vec::with_capacity( 0 )
	};
	let Some( sub_category_section ) = category_section.child( sub_category ) else {
		return Vec::with_capacity( 0 )
	};

	sub_category_section.children().iter()
		.filter_map( instance_name )
		.filter(| name | match name.trim().is_empty() {
			true => {
				debug!( category, sub_category, "skipping blank plugin instance name" );
				false
			},
			false => true,
		})
		.unique()
		.map(| name | ResolvedInstance {
			config_scope: sub_category_section.child( name ).cloned()
				.unwrap_or_else(|| ConfigSection::empty( join_path( sub_category_section.path(), name ))),
			name: Some( name.to_string() ),
		})
		.collect()

}

// Value first (array encoding), then non-numeric key (keyed encoding).
fn instance_name( child: &ConfigSection ) -> Option<&str> {
	match child.value() {
		Some( value ) if !value.is_empty() => Some( value ),
		_ if !is_numeric_key( child.key() ) => Some( child.key() ),
		_ => None,
	}
}

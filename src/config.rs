//! Read-only hierarchical configuration.
//!
//! A [`ConfigSection`] is a node in a tree of string keys. Every node may carry a
//! scalar value, children, or both. Paths are written with [`KEY_DELIMITER`]
//! (`"Hitch:Plugins:Database"`) and key lookup ignores ASCII case.
//!
//! Trees are built from JSON, TOML or flat `key:path = value` pairs. All three
//! sources agree on the shape: objects become named children, arrays become
//! children keyed by their index (`"0"`, `"1"`, ...) and scalars become values.
//!
//! ```
//! use hitch::ConfigSection ;
//!
//! let config = ConfigSection::from_pairs([
//! 	( "Hitch:Plugins:Database:Postgres:0", "Primary" ),
//! 	( "Hitch:Plugins:Database:Postgres:1", "Replica" ),
//! ]);
//!
//! assert_eq!(
//! 	config.get_strings( "Hitch:Plugins:Database:Postgres" ),
//! 	vec![ "Primary".to_string(), "Replica".to_string() ],
//! );
//! assert!( !config.section( "hitch:plugins:storage" ).exists() );
//! ```

use std::cmp::Ordering ;
use thiserror::Error ;



/// Separates the segments of a configuration path.
pub const KEY_DELIMITER: &str = ":" ;

/// Errors produced while building a configuration tree from text.
#[derive( Error, Debug )]
pub enum ConfigError {
	#[error( "JSON parse error: {0}" )] Json( #[from] serde_json::Error ),
	#[error( "TOML parse error: {0}" )] Toml( #[from] toml::de::Error ),
}

/// A node of the configuration tree together with its full path.
#[derive( Debug, Clone, Default, PartialEq, Eq )]
pub struct ConfigSection {
	key: String,
	path: String,
	value: Option<String>,
	children: Vec<ConfigSection>,
}

impl ConfigSection {

	/// An empty root node.
	pub fn new() -> Self { Self::default() }

	/// An empty node located at `path`. Used wherever a scope is required but
	/// nothing is configured there.
	pub fn empty( path: impl Into<String> ) -> Self {
		let path = path.into();
		let key = path.rsplit( KEY_DELIMITER ).next().unwrap_or_default().to_string();
		Self { key, path, value: None, children: Vec::with_capacity( 0 ) }
	}

	/// Builds a tree from flat `( "a:b:c", value )` pairs.
	///
	/// Later pairs overwrite the value of earlier pairs with the same path.
	pub fn from_pairs<K, V>( pairs: impl IntoIterator<Item = ( K, V )> ) -> Self
	where
		K: AsRef<str>,
		V: Into<String>,
	{
		let mut root = Self::new();
		pairs.into_iter().for_each(|( key, value )| {
			let segments = key.as_ref().split( KEY_DELIMITER ).collect::<Vec<_>>();
			root.insert( &segments, value.into() );
		});
		root.sort_recursive();
		root
	}

	/// Builds a tree from a parsed JSON document. The document root must be an
	/// object for it to contribute any keys.
	pub fn from_json( document: &serde_json::Value ) -> Self {
		let mut root = Self::new();
		if let serde_json::Value::Object( map ) = document {
			root.children = map.iter()
				.map(|( key, value )| Self::from_json_node( &root.path, key, value ))
				.collect();
		}
		root.sort_recursive();
		root
	}

	/// Parses JSON text into a tree.
	///
	/// # Errors
	/// Returns an error if the text is not valid JSON.
	pub fn from_json_str( text: &str ) -> Result<Self, ConfigError> {
		Ok( Self::from_json( &serde_json::from_str( text )? ))
	}

	/// Parses TOML text into a tree.
	///
	/// # Errors
	/// Returns an error if the text is not a valid TOML document.
	pub fn from_toml_str( text: &str ) -> Result<Self, ConfigError> {
		let table = text.parse::<toml::Table>()?;
		let mut root = Self::new();
		root.children = table.iter()
			.map(|( key, value )| Self::from_toml_node( &root.path, key, value ))
			.collect();
		root.sort_recursive();
		Ok( root )
	}

	/// Last segment of this node's path.
	#[inline] pub fn key( &self ) -> &str { &self.key }

	/// Full path of this node from the root, segments joined by [`KEY_DELIMITER`].
	#[inline] pub fn path( &self ) -> &str { &self.path }

	/// The scalar value stored at this node, if any.
	#[inline] pub fn value( &self ) -> Option<&str> { self.value.as_deref() }

	/// Direct children, in configuration key order.
	#[inline] pub fn children( &self ) -> &[ConfigSection] { &self.children }

	/// A node exists when it holds a value or has at least one child.
	#[inline] pub fn exists( &self ) -> bool { self.value.is_some() || !self.children.is_empty() }

	/// The direct child stored under `key`.
	pub fn child( &self, key: &str ) -> Option<&ConfigSection> {
		self.children.iter().find(| child | child.key.eq_ignore_ascii_case( key ))
	}

	/// The descendant stored under a delimited `path` relative to this node.
	pub fn get( &self, path: &str ) -> Option<&ConfigSection> {
		path.split( KEY_DELIMITER )
			.try_fold( self, | node, segment | node.child( segment ))
	}

	/// Owned copy of the descendant at `path`, or an empty node at that location.
	pub fn section( &self, path: &str ) -> ConfigSection {
		match self.get( path ) {
			Some( section ) => section.clone(),
			None => Self::empty( join_path( &self.path, path )),
		}
	}

	/// Ordered scalar values of the children at `path`. Children without a value
	/// and children with an empty value are left out.
	pub fn get_strings( &self, path: &str ) -> Vec<String> {
		self.get( path )
			.map(| section | section.children.iter()
				.filter_map(| child | child.value().filter(| value | !value.is_empty() ))
				.map( str::to_string )
				.collect()
			)
			.unwrap_or_default()
	}

	fn insert( &mut self, segments: &[&str], value: String ) {
		let Some(( first, rest )) = segments.split_first() else {
			self.value = Some( value );
			return
		};
		let index = match self.children.iter().position(| child | child.key.eq_ignore_ascii_case( first )) {
			Some( index ) => index,
			None => {
				self.children.push( Self::empty( join_path( &self.path, first )));
				self.children.len() - 1
			}
		};
		self.children[index].insert( rest, value );
	}

	fn from_json_node( parent: &str, key: &str, value: &serde_json::Value ) -> Self {
		let mut node = Self::empty( join_path( parent, key ));
		match value {
			serde_json::Value::Object( map ) => node.children = map.iter()
				.map(|( key, value )| Self::from_json_node( &node.path, key, value ))
				.collect(),
			serde_json::Value::Array( items ) => node.children = items.iter().enumerate()
				.map(|( index, value )| Self::from_json_node( &node.path, &index.to_string(), value ))
				.collect(),
			serde_json::Value::String( text ) => node.value = Some( text.clone() ),
			serde_json::Value::Null => node.value = Some( String::new() ),
			serde_json::Value::Bool( _ ) | serde_json::Value::Number( _ ) => node.value = Some( value.to_string() ),
		}
		node
	}

	fn from_toml_node( parent: &str, key: &str, value: &toml::Value ) -> Self {
		let mut node = Self::empty( join_path( parent, key ));
		match value {
			toml::Value::Table( table ) => node.children = table.iter()
				.map(|( key, value )| Self::from_toml_node( &node.path, key, value ))
				.collect(),
			toml::Value::Array( items ) => node.children = items.iter().enumerate()
				.map(|( index, value )| Self::from_toml_node( &node.path, &index.to_string(), value ))
				.collect(),
			toml::Value::String( text ) => node.value = Some( text.clone() ),
			toml::Value::Integer( _ ) | toml::Value::Float( _ ) | toml::Value::Boolean( _ ) | toml::Value::Datetime( _ )
			=> node.value = Some( value.to_string() ),
		}
		node
	}

	fn sort_recursive( &mut self ) {
		self.children.sort_by(| a, b | compare_keys( &a.key, &b.key ));
		self.children.iter_mut().for_each( Self::sort_recursive );
	}

}

/// Whether `key` consists of ASCII digits only.
pub(crate) fn is_numeric_key( key: &str ) -> bool {
	!key.is_empty() && key.bytes().all(| byte | byte.is_ascii_digit() )
}

pub(crate) fn join_path( parent: &str, key: &str ) -> String {
	match parent.is_empty() {
		true => key.to_string(),
		false => format!( "{}{}{}", parent, KEY_DELIMITER, key ),
	}
}

// Numeric keys sort numerically and ahead of everything else; the rest sort
// case-insensitively.
fn compare_keys( a: &str, b: &str ) -> Ordering {
	match ( is_numeric_key( a ), is_numeric_key( b )) {
		( true, true ) => {
			let a = a.trim_start_matches( '0' );
			let b = b.trim_start_matches( '0' );
			a.len().cmp( &b.len() ).then_with(|| a.cmp( b ))
		},
		( true, false ) => Ordering::Less,
		( false, true ) => Ordering::Greater,
		( false, false ) => a.to_ascii_lowercase().cmp( &b.to_ascii_lowercase() ),
	}
}

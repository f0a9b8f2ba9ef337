//! Plugin descriptors: the static declaration of a provider type and its
//! optional two-level category.

use std::any::type_name ;
use thiserror::Error ;



/// Reference to a plugin provider type.
///
/// Provider types are identified by name. In-process providers use their Rust
/// type path ([`ProviderType::of`]); manifests on disk spell the same name out.
#[derive( Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord )]
pub struct ProviderType( String );

impl ProviderType {
	/// The provider type named after the Rust type `P`.
	pub fn of<P: ?Sized>() -> Self { Self( type_name::<P>().to_string() ) }

	/// A provider type referenced by an arbitrary name.
	pub fn named( name: impl Into<String> ) -> Self { Self( name.into() ) }

	#[inline] pub fn name( &self ) -> &str { &self.0 }
}

impl std::fmt::Display for ProviderType {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { write!( f, "{}", self.0 )}
}

/// A category and subcategory pair. Both are always present together.
#[derive( Debug, Clone, PartialEq, Eq, Hash )]
pub struct Category {
	category: String,
	sub_category: String,
}

impl Category {
	#[inline] pub fn category( &self ) -> &str { &self.category }
	#[inline] pub fn sub_category( &self ) -> &str { &self.sub_category }
}

impl std::fmt::Display for Category {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
		write!( f, "{}/{}", self.category, self.sub_category )
	}
}

/// Errors raised while reading the plugin metadata a module declares.
#[derive( Error, Debug )]
pub enum MetadataError {
	#[error( "Plugin entry has no provider type" )] MissingProvider,
	#[error( "Provider '{provider}' declares a category without a subcategory (or the reverse)" )]
	IncompleteCategory { provider: String },
	#[error( "Malformed plugin manifest: {0}" )] Malformed( #[from] toml::de::Error ),
	#[error( "{0}" )] Other( String ),
}

/// Declares that a module provides a plugin.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct PluginDescriptor {
	provider: ProviderType,
	category: Option<Category>,
}

impl PluginDescriptor {

	/// A descriptor attached exactly once, without an instance name.
	pub fn uncategorized( provider: ProviderType ) -> Self {
		Self { provider, category: None }
	}

	/// A descriptor whose instances are taken from `Plugins:<category>:<sub_category>`.
	///
	/// # Errors
	/// Fails if either part is blank.
	pub fn categorized(
		provider: ProviderType,
		category: impl Into<String>,
		sub_category: impl Into<String>,
	) -> Result<Self, MetadataError> {
		Self::from_parts( provider, Some( category.into() ), Some( sub_category.into() ))
	}

	/// Builds a descriptor from raw metadata fields.
	///
	/// Blank strings count as absent. The category and subcategory must be
	/// either both present or both absent.
	///
	/// # Errors
	/// Fails if the provider name is blank or only one half of the category is given.
	pub fn from_parts(
		provider: ProviderType,
		category: Option<String>,
		sub_category: Option<String>,
	) -> Result<Self, MetadataError> {

		if provider.name().trim().is_empty() { return Err( MetadataError::MissingProvider ) }

		let category = category.filter(| value | !value.trim().is_empty() );
		let sub_category = sub_category.filter(| value | !value.trim().is_empty() );

		match ( category, sub_category ) {
			( None, None ) => Ok( Self::uncategorized( provider )),
			( Some( category ), Some( sub_category )) => Ok( Self {
				provider,
				category: Some( Category { category, sub_category }),
			}),
			_ => Err( MetadataError::IncompleteCategory { provider: provider.name().to_string() }),
		}

	}

	#[inline] pub fn provider( &self ) -> &ProviderType { &self.provider }
	#[inline] pub fn category( &self ) -> Option<&Category> { self.category.as_ref() }
}

impl std::fmt::Display for PluginDescriptor {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
		match &self.category {
			Some( category ) => write!( f, "{} ({})", self.provider, category ),
			None => write!( f, "{}", self.provider ),
		}
	}
}

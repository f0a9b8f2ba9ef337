//! The component registry plugins attach into.
//!
//! The engine only needs "register component C, optionally keyed by name", which is
//! what [`ComponentRegistry`] expresses. [`ServiceCollection`] is a minimal in-memory
//! implementation with typed lookup, enough for hosts that have no container of
//! their own.

use std::any::{ Any, TypeId, type_name };
use std::sync::Arc ;



/// A registered component: a shared instance, its type and an optional key.
#[derive( Clone )]
pub struct Component {
	type_id: TypeId,
	type_name: &'static str,
	name: Option<String>,
	instance: Arc<dyn Any + Send + Sync>,
}

impl Component {

	pub fn new<T: Any + Send + Sync>( name: Option<&str>, instance: T ) -> Self {
		Self::from_arc( name, Arc::new( instance ))
	}

	pub fn from_arc<T: Any + Send + Sync>( name: Option<&str>, instance: Arc<T> ) -> Self {
		Self {
			type_id: TypeId::of::<T>(),
			type_name: type_name::<T>(),
			name: name.map( str::to_string ),
			instance,
		}
	}

	#[inline] pub fn type_name( &self ) -> &'static str { self.type_name }
	#[inline] pub fn name( &self ) -> Option<&str> { self.name.as_deref() }
	#[inline] pub fn is<T: Any>( &self ) -> bool { self.type_id == TypeId::of::<T>() }

	/// The instance, if it is a `T`.
	pub fn downcast<T: Any + Send + Sync>( &self ) -> Option<Arc<T>> {
		Arc::clone( &self.instance ).downcast::<T>().ok()
	}

}

impl std::fmt::Debug for Component {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "Component" )
			.field( "type_name", &self.type_name )
			.field( "name", &self.name )
			.finish_non_exhaustive()
	}
}

/// Accepts components registered by plugin providers.
pub trait ComponentRegistry {
	fn register( &mut self, component: Component );
}

/// Typed registration helpers for every [`ComponentRegistry`].
pub trait RegistryExt: ComponentRegistry {

	/// Registers `instance` without a key.
	fn add<T: Any + Send + Sync>( &mut self, instance: T ) {
		self.register( Component::new( None, instance ));
	}

	/// Registers `instance` under `name`.
	fn add_named<T: Any + Send + Sync>( &mut self, name: &str, instance: T ) {
		self.register( Component::new( Some( name ), instance ));
	}

	/// Registers `instance` under `name` when one is given, unkeyed otherwise.
	fn add_keyed<T: Any + Send + Sync>( &mut self, name: Option<&str>, instance: T ) {
		self.register( Component::new( name, instance ));
	}

}

impl<R: ComponentRegistry + ?Sized> RegistryExt for R {}

/// An ordered list of registered components.
#[derive( Debug, Clone, Default )]
pub struct ServiceCollection {
	components: Vec<Component>,
}

impl ServiceCollection {

	pub fn new() -> Self { Self::default() }

	#[inline] pub fn len( &self ) -> usize { self.components.len() }
	#[inline] pub fn is_empty( &self ) -> bool { self.components.is_empty() }
	#[inline] pub fn iter( &self ) -> std::slice::Iter<'_, Component> { self.components.iter() }

	/// The most recent unkeyed registration of `T`.
	pub fn get<T: Any + Send + Sync>( &self ) -> Option<Arc<T>> {
		self.components.iter().rev()
			.filter(| component | component.name.is_none() )
			.find_map( Component::downcast::<T> )
	}

	/// The most recent registration of `T` keyed by `name`.
	pub fn get_named<T: Any + Send + Sync>( &self, name: &str ) -> Option<Arc<T>> {
		self.components.iter().rev()
			.filter(| component | component.name.as_deref() == Some( name ))
			.find_map( Component::downcast::<T> )
	}

	/// Every unkeyed registration of `T`, oldest first.
	pub fn all<T: Any + Send + Sync>( &self ) -> Vec<Arc<T>> {
		self.components.iter()
			.filter(| component | component.name.is_none() )
			.filter_map( Component::downcast::<T> )
			.collect()
	}

	/// Keys under which `T` has been registered, oldest first.
	pub fn names<T: Any>( &self ) -> Vec<&str> {
		self.components.iter()
			.filter(| component | component.is::<T>() )
			.filter_map( Component::name )
			.collect()
	}

}

impl ComponentRegistry for ServiceCollection {
	fn register( &mut self, component: Component ) {
		self.components.push( component );
	}
}

impl<'a> IntoIterator for &'a ServiceCollection {
	type Item = &'a Component ;
	type IntoIter = std::slice::Iter<'a, Component> ;
	fn into_iter( self ) -> Self::IntoIter { self.components.iter() }
}

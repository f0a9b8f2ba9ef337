use hitch::{ CollectError, LoadError, ManifestLoader, ModuleCollector, ModuleRegistry };
use crate::test_manifests ;

#[test]
fn collector_manifest_loading_registers_loaded_modules() {

	let dir = tempfile::tempdir().expect( "temp dir" );
	test_manifests::write( dir.path(), "weather.hitch.toml", test_manifests::WEATHER );

	let registry = ModuleRegistry::new();
	let collector = ModuleCollector::new( &registry, &ManifestLoader, dir.path() );

	let ( modules, warnings ) = collector.collect( Vec::new(), &[ "*.hitch.toml".to_string() ]);

	assert_no_warnings!( warnings );
	assert_eq!( modules.len(), 1 );
	assert_eq!( registry.len(), 1 );
	assert!( registry.find( "weather" ).is_some() );

}

#[test]
fn collector_manifest_loading_is_idempotent() {

	let dir = tempfile::tempdir().expect( "temp dir" );
	test_manifests::write( dir.path(), "weather.hitch.toml", test_manifests::WEATHER );
	test_manifests::write( dir.path(), "storage.hitch.toml", test_manifests::STORAGE );

	let registry = ModuleRegistry::new();
	let collector = ModuleCollector::new( &registry, &ManifestLoader, dir.path() );
	let patterns = [ "*.hitch.toml".to_string(), "weather.*".to_string() ];

	let ( first, first_warnings ) = collector.collect( Vec::new(), &patterns );
	let ( second, second_warnings ) = collector.collect( Vec::new(), &patterns );

	assert_no_warnings!( first_warnings );
	assert_no_warnings!( second_warnings );
	assert_eq!( first.len(), 2 );
	assert_eq!( first.ids().collect::<Vec<_>>(), second.ids().collect::<Vec<_>>() );
	assert_eq!( registry.len(), 2 );

}

#[test]
fn collector_manifest_loading_skips_unloadable_files() {

	let dir = tempfile::tempdir().expect( "temp dir" );
	test_manifests::write( dir.path(), "a-broken.hitch.toml", test_manifests::NOT_TOML );
	test_manifests::write( dir.path(), "b-weather.hitch.toml", test_manifests::WEATHER );

	let registry = ModuleRegistry::new();
	let collector = ModuleCollector::new( &registry, &ManifestLoader, dir.path() );

	let ( modules, warnings ) = collector.collect( Vec::new(), &[ "*.hitch.toml".to_string() ]);

	assert_eq!( modules.len(), 1 );
	assert_eq!( warnings.len(), 1 );
	match &warnings[0] {
		CollectError::Load( LoadError::InvalidManifest { path, .. }) => assert!( path.ends_with( "a-broken.hitch.toml" )),
		err => panic!( "Unexpected error: {}", err ),
	}

}

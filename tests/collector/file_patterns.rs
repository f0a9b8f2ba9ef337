use hitch::{ find_matching_files, CollectError };
use crate::test_manifests ;

#[test]
fn collector_file_patterns_match_file_names_at_any_depth() {

	let dir = tempfile::tempdir().expect( "temp dir" );
	test_manifests::write( dir.path(), "b.hitch.toml", test_manifests::STORAGE );
	test_manifests::write( dir.path(), "nested/a.hitch.toml", test_manifests::WEATHER );
	test_manifests::write( dir.path(), "ignored.toml", test_manifests::WEATHER );

	let files = find_matching_files( dir.path(), "*.hitch.toml" ).expect( "matches" );

	let names = files.iter()
		.filter_map(| file | file.file_name() )
		.map(| name | name.to_string_lossy().into_owned() )
		.collect::<Vec<_>>();
	assert_eq!( names.len(), 2 );
	assert!( names.contains( &"a.hitch.toml".to_string() ));
	assert!( names.contains( &"b.hitch.toml".to_string() ));

}

#[test]
fn collector_file_patterns_with_separator_match_relative_path() {

	let dir = tempfile::tempdir().expect( "temp dir" );
	test_manifests::write( dir.path(), "plugins/weather.toml", test_manifests::WEATHER );
	test_manifests::write( dir.path(), "other/storage.toml", test_manifests::STORAGE );

	let files = find_matching_files( dir.path(), "plugins/*.toml" ).expect( "matches" );

	assert_eq!( files.len(), 1 );
	assert!( files[0].ends_with( "plugins/weather.toml" ));

}

#[test]
fn collector_file_patterns_no_matches() {

	let dir = tempfile::tempdir().expect( "temp dir" );
	test_manifests::write( dir.path(), "weather.toml", test_manifests::WEATHER );

	match find_matching_files( dir.path(), "*.hitch.toml" ) {
		Err( CollectError::NoMatches { pattern, .. }) => assert_eq!( pattern, "*.hitch.toml" ),
		Err( err ) => panic!( "Unexpected error: {}", err ),
		Ok( files ) => panic!( "Expected no matches, found {:?}", files ),
	}

}

#[test]
fn collector_file_patterns_invalid_pattern() {

	let dir = tempfile::tempdir().expect( "temp dir" );

	match find_matching_files( dir.path(), "[unclosed" ) {
		Err( CollectError::InvalidPattern { .. }) => {},
		Err( err ) => panic!( "Unexpected error: {}", err ),
		Ok( files ) => panic!( "Expected failure, found {:?}", files ),
	}

}

#[test]
fn collector_file_patterns_missing_base_directory() {

	let dir = tempfile::tempdir().expect( "temp dir" );
	let missing = dir.path().join( "does-not-exist" );

	match find_matching_files( &missing, "*.toml" ) {
		Err( CollectError::Search { directory, .. }) => assert_eq!( directory, missing ),
		Err( err ) => panic!( "Unexpected error: {}", err ),
		Ok( files ) => panic!( "Expected failure, found {:?}", files ),
	}

}

use hitch::{ ConfigError, ConfigSection };

#[test]
fn config_sources_json_scalars_become_strings() {

	let config = ConfigSection::from_json_str( r#"{
		"Pool": 8, "Enabled": true, "Ratio": 0.5, "Missing": null, "Name": "db"
	}"# ).expect( "valid configuration" );

	assert_eq!( config.get( "Pool" ).and_then( ConfigSection::value ), Some( "8" ));
	assert_eq!( config.get( "Enabled" ).and_then( ConfigSection::value ), Some( "true" ));
	assert_eq!( config.get( "Ratio" ).and_then( ConfigSection::value ), Some( "0.5" ));
	assert_eq!( config.get( "Missing" ).and_then( ConfigSection::value ), Some( "" ));
	assert_eq!( config.get( "Name" ).and_then( ConfigSection::value ), Some( "db" ));

}

#[test]
fn config_sources_arrays_become_indexed_children() {

	let config = ConfigSection::from_json_str( r#"{ "List": [ "a", { "Inner": "b" } ] }"# )
		.expect( "valid configuration" );

	let list = config.get( "List" ).expect( "list" );
	let keys = list.children().iter().map( ConfigSection::key ).collect::<Vec<_>>();
	assert_eq!( keys, vec![ "0", "1" ]);
	assert_eq!( list.get( "1:Inner" ).map( ConfigSection::path ), Some( "List:1:Inner" ));

}

#[test]
fn config_sources_json_toml_and_pairs_agree() {

	let json = ConfigSection::from_json_str( r#"{ "Hitch": { "Plugins": { "Service": { "Sample": [ "A", "B" ] } } } }"# )
		.expect( "valid JSON" );
	let toml = ConfigSection::from_toml_str( "[Hitch.Plugins.Service]\nSample = [ \"A\", \"B\" ]\n" )
		.expect( "valid TOML" );
	let pairs = ConfigSection::from_pairs([
		( "Hitch:Plugins:Service:Sample:0", "A" ),
		( "Hitch:Plugins:Service:Sample:1", "B" ),
	]);

	assert_eq!( json, toml );
	assert_eq!( json, pairs );

}

#[test]
fn config_sources_invalid_text() {
	assert!( matches!( ConfigSection::from_json_str( "{ not json" ), Err( ConfigError::Json( _ ))));
	assert!( matches!( ConfigSection::from_toml_str( "= nope" ), Err( ConfigError::Toml( _ ))));
}

#[test]
fn config_sources_later_pairs_overwrite() {

	let config = ConfigSection::from_pairs([( "A:B", "first" ), ( "a:b", "second" )]);

	assert_eq!( config.children().len(), 1 );
	assert_eq!( config.get( "A:B" ).and_then( ConfigSection::value ), Some( "second" ));

}

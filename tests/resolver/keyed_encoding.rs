use hitch::{ resolve, ConfigSection };

fn root() -> ConfigSection {
	ConfigSection::from_json_str( r#"{
		"Plugins": { "Database": { "Postgres": {
			"Primary": { "Host": "db-1", "Pool": { "Max": 8 } },
			"Replica": {}
		}}}
	}"# ).expect( "valid configuration" )
}

#[test]
fn resolver_keyed_encoding_names_are_keys() {

	let names = resolve( "Database", "Postgres", &root() ).into_iter()
		.filter_map(| instance | instance.name )
		.collect::<Vec<_>>();
	assert_eq!( names, vec![ "Primary", "Replica" ]);

}

#[test]
fn resolver_keyed_encoding_scope_is_instance_subtree() {

	let root = root();
	let instances = resolve( "Database", "Postgres", &root );
	let primary = &instances[0].config_scope ;

	assert_eq!( primary.path(), "Plugins:Database:Postgres:Primary" );
	assert_eq!( primary.get( "Host" ).and_then( ConfigSection::value ), Some( "db-1" ));
	assert_eq!( primary.get( "Pool:Max" ).and_then( ConfigSection::value ), Some( "8" ));
	assert_eq!( Some( primary ), root.get( "Plugins:Database:Postgres:Primary" ));

}

#[test]
fn resolver_keyed_encoding_empty_instance_still_resolves() {

	let instances = resolve( "Database", "Postgres", &root() );

	assert_eq!( instances[1].name(), Some( "Replica" ));
	assert!( !instances[1].config_scope.exists() );

}

#[test]
fn resolver_keyed_encoding_from_toml() {

	let root = ConfigSection::from_toml_str( r#"
		[Plugins.Database.Postgres.Primary]
		Host = "db-1"
	"# ).expect( "valid configuration" );

	let instances = resolve( "Database", "Postgres", &root );
	assert_eq!( instances.len(), 1 );
	assert_eq!( instances[0].config_scope.get( "Host" ).and_then( ConfigSection::value ), Some( "db-1" ));

}
